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

//! CSV dialect: the separator/escape character pair.

use crate::error::{CsvError, CsvResult};

/// Default field separator.
pub const DEFAULT_SEPARATOR: char = ',';

/// Default escape (quote) character.
pub const DEFAULT_ESCAPE: char = '"';

/// Check that `separator` and `escape` form a usable dialect.
///
/// Rejects a separator equal to the escape character, and either character
/// being a carriage return or line feed. Runs before any parser exists, so
/// a bad combination never reaches the input.
///
/// # Examples
///
/// ```
/// use pullcsv::validate_dialect;
///
/// assert!(validate_dialect(';', '\'').is_ok());
/// assert!(validate_dialect('"', '"').is_err());
/// assert!(validate_dialect('\r', '"').is_err());
/// ```
pub fn validate_dialect(separator: char, escape: char) -> CsvResult<()> {
    let reason = if separator == escape {
        "separator and escape must differ"
    } else if is_line_break(separator) {
        "separator must not be a line break"
    } else if is_line_break(escape) {
        "escape must not be a line break"
    } else {
        return Ok(());
    };

    Err(CsvError::IllegalDialect {
        separator,
        escape,
        reason,
    })
}

#[inline]
fn is_line_break(c: char) -> bool {
    c == '\r' || c == '\n'
}

/// A validated `(separator, escape)` pair.
///
/// The only way to obtain one is through [`Dialect::new`] (or `Default`),
/// so every `Dialect` satisfies the validation rules and cannot change
/// afterwards.
///
/// # Examples
///
/// ```
/// use pullcsv::Dialect;
///
/// let tsv = Dialect::new('\t', '"').unwrap();
/// assert_eq!(tsv.separator(), '\t');
/// assert!(tsv.is_separator_or_newline('\t'));
/// assert!(tsv.is_separator_or_newline('\n'));
/// assert!(!tsv.is_separator_or_newline(','));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawDialect")
)]
pub struct Dialect {
    separator: char,
    escape: char,
}

impl Dialect {
    /// Build a dialect, validating it first.
    pub fn new(separator: char, escape: char) -> CsvResult<Self> {
        validate_dialect(separator, escape)?;
        Ok(Self { separator, escape })
    }

    /// Field separator.
    #[inline]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Escape (quote) character.
    #[inline]
    pub fn escape(&self) -> char {
        self.escape
    }

    /// Whether `c` ends an unescaped value: the separator, CR or LF.
    #[inline]
    pub fn is_separator_or_newline(&self, c: char) -> bool {
        c == self.separator || is_line_break(c)
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            escape: DEFAULT_ESCAPE,
        }
    }
}

/// Unvalidated form used for deserialization.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDialect {
    separator: char,
    escape: char,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDialect> for Dialect {
    type Error = CsvError;

    fn try_from(raw: RawDialect) -> CsvResult<Self> {
        Dialect::new(raw.separator, raw.escape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect() {
        let d = Dialect::default();
        assert_eq!(d.separator(), ',');
        assert_eq!(d.escape(), '"');
        assert_eq!(Dialect::new(',', '"').unwrap(), d);
    }

    #[test]
    fn test_common_dialects() {
        for (sep, esc) in [(',', '"'), (';', '"'), ('\t', '"'), ('|', '\''), (' ', '"')] {
            assert!(Dialect::new(sep, esc).is_ok(), "{:?}/{:?}", sep, esc);
        }
    }

    #[test]
    fn test_same_characters_rejected() {
        match validate_dialect(',', ',') {
            Err(CsvError::IllegalDialect { reason, .. }) => assert!(reason.contains("differ")),
            other => panic!("expected IllegalDialect, got {:?}", other),
        }
    }

    #[test]
    fn test_line_breaks_rejected() {
        assert!(validate_dialect('\n', '"').is_err());
        assert!(validate_dialect('\r', '"').is_err());
        assert!(validate_dialect(',', '\n').is_err());
        assert!(validate_dialect(',', '\r').is_err());
        assert!(validate_dialect('\r', '\n').is_err());
        assert!(validate_dialect('\n', '\n').is_err());
    }

    #[test]
    fn test_separator_or_newline() {
        let d = Dialect::default();
        assert!(d.is_separator_or_newline(','));
        assert!(d.is_separator_or_newline('\r'));
        assert!(d.is_separator_or_newline('\n'));
        assert!(!d.is_separator_or_newline('"'));
        assert!(!d.is_separator_or_newline(' '));
        assert!(!d.is_separator_or_newline(';'));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates() {
        let d: Dialect = serde_json::from_str(r#"{"separator":";","escape":"'"}"#).unwrap();
        assert_eq!(d.separator(), ';');
        assert_eq!(d.escape(), '\'');

        let bad = serde_json::from_str::<Dialect>(r#"{"separator":",","escape":","}"#);
        assert!(bad.is_err());

        let json = serde_json::to_string(&Dialect::default()).unwrap();
        assert_eq!(json, r#"{"separator":",","escape":"\""}"#);
    }
}
