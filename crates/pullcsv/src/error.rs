// Dweve pullcsv - Streaming CSV-dialect parser
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for CSV parsing and writing.

use pullcsv_core::StreamError;
use thiserror::Error;

/// CSV error types.
///
/// Dialect errors are raised when a [`Dialect`](crate::Dialect) is built,
/// before any character is read. Malformed quoting is only reported when
/// strict mode is enabled; the default parser degrades it instead.
///
/// # Examples
///
/// ```
/// use pullcsv::{CsvError, Dialect};
///
/// let err = Dialect::new(',', ',').unwrap_err();
/// assert!(matches!(err, CsvError::IllegalDialect { .. }));
/// assert!(err.to_string().contains("must differ"));
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// Separator and escape characters cannot be used together.
    #[error("Illegal dialect (separator {separator:?}, escape {escape:?}): {reason}")]
    IllegalDialect {
        /// Requested separator.
        separator: char,
        /// Requested escape character.
        escape: char,
        /// Why the combination was rejected.
        reason: &'static str,
    },

    /// Error from the underlying character stream.
    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    /// Strict mode: a quoted field reached end of data without closing.
    #[error("Unterminated quoted field starting at character {start}")]
    UnterminatedQuote {
        /// Character offset where the field started.
        start: usize,
    },

    /// Strict mode: text between a closing quote and the next boundary.
    #[error("Unexpected character {found:?} at character {position} after closing quote")]
    UnexpectedCharacter {
        /// Character offset of the offending character.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// A field grew past the configured length limit.
    #[error("Field starting at character {start} exceeds {limit} bytes")]
    FieldTooLong {
        /// Character offset where the field started.
        start: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The writer needs single-byte separator and escape characters.
    #[error("Dialect (separator {separator:?}, escape {escape:?}) cannot be written: characters must be ASCII")]
    NonAsciiDialect {
        /// Dialect separator.
        separator: char,
        /// Dialect escape character.
        escape: char,
    },

    /// CSV library error while writing.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),

    /// IO error while flushing written rows.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CsvError {
    /// Whether this is the end-of-data signal of a row sequence.
    #[inline]
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, Self::Stream(e) if e.is_end_of_data())
    }

    /// Get the character offset if available.
    #[inline]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::UnterminatedQuote { start } | Self::FieldTooLong { start, .. } => Some(*start),
            Self::UnexpectedCharacter { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_dialect_display() {
        let err = CsvError::IllegalDialect {
            separator: ';',
            escape: '\n',
            reason: "escape must not be a line break",
        };
        let display = err.to_string();
        assert!(display.contains("';'"));
        assert!(display.contains("'\\n'"));
        assert!(display.contains("line break"));
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_stream_error_wrapped() {
        let err: CsvError = StreamError::EndOfData.into();
        assert!(err.is_end_of_data());
        assert!(err.to_string().contains("End of data"));
    }

    #[test]
    fn test_poisoned_is_not_end_of_data() {
        let err: CsvError = StreamError::poisoned("boom").into();
        assert!(!err.is_end_of_data());
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_positions() {
        assert_eq!(CsvError::UnterminatedQuote { start: 4 }.position(), Some(4));
        assert_eq!(
            CsvError::UnexpectedCharacter {
                position: 9,
                found: 'x'
            }
            .position(),
            Some(9)
        );
        assert_eq!(
            CsvError::FieldTooLong { start: 2, limit: 8 }.position(),
            Some(2)
        );
    }

    #[test]
    fn test_unexpected_character_display() {
        let err = CsvError::UnexpectedCharacter {
            position: 3,
            found: 'B',
        };
        let display = err.to_string();
        assert!(display.contains("'B'"));
        assert!(display.contains("3"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: CsvError = io_err.into();
        assert!(matches!(err, CsvError::Io(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
