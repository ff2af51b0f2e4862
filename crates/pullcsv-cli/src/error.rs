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

//! Structured error types for the pullcsv CLI.

use pullcsv::CsvError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path, or `<stdin>` / `<stdout>`
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The input could not be parsed.
    #[error("Parse error in '{path}' at row {row}: {message}")]
    Parse {
        /// The input that failed
        path: PathBuf,
        /// 1-based row being parsed when the error occurred
        row: usize,
        /// The error message
        message: String,
    },

    /// A row could not be rendered as JSON.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// `--separator` / `--escape` do not form a legal dialect.
    #[error("Invalid dialect: {0}")]
    InvalidDialect(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create a parse error for `row` of `path`.
    ///
    /// Stream I/O failures surfacing through the parser are reported as I/O
    /// errors rather than parse errors.
    pub fn parse_error(path: impl Into<PathBuf>, row: usize, err: CsvError) -> Self {
        match err {
            CsvError::Stream(pullcsv::StreamError::Io(e)) | CsvError::Io(e) => {
                Self::io_error(path, e)
            }
            other => Self::Parse {
                path: path.into(),
                row,
                message: other.to_string(),
            },
        }
    }

    /// Wrap a dialect construction failure.
    pub fn invalid_dialect(err: CsvError) -> Self {
        Self::InvalidDialect(err.to_string())
    }

    /// Create a JSON output error.
    pub fn json_error(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pullcsv::{Dialect, StreamError};

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "data.csv",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "I/O error for 'data.csv': missing");
    }

    #[test]
    fn test_parse_error_display() {
        let err = CliError::parse_error("a.csv", 3, CsvError::UnterminatedQuote { start: 7 });
        let msg = err.to_string();
        assert!(msg.contains("a.csv"));
        assert!(msg.contains("row 3"));
    }

    #[test]
    fn test_stream_io_becomes_io_error() {
        let inner = io::Error::new(io::ErrorKind::BrokenPipe, "pipe");
        let err = CliError::parse_error("<stdin>", 1, CsvError::Stream(StreamError::Io(inner)));
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_dialect_error_conversion() {
        let err = CliError::invalid_dialect(Dialect::new(',', ',').unwrap_err());
        assert!(matches!(err, CliError::InvalidDialect(_)));
    }
}
