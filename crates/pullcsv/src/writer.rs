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

//! Dialect-matching CSV writer.
//!
//! Writes rows so that [`CsvParser`](crate::CsvParser) with the same dialect
//! reads back the original fields: values containing the separator, the
//! escape character or a line break are wrapped in escape characters, and
//! escape characters inside them are doubled.
//!
//! ```rust
//! use pullcsv::{parse_str, to_csv_string, CsvWriterConfig, Row};
//!
//! let rows = vec![Row::from(vec!["say \"hi\"".to_string(), "a,b".to_string()])];
//! let text = to_csv_string(&rows, CsvWriterConfig::default()).unwrap();
//! assert_eq!(text, "\"say \"\"hi\"\"\",\"a,b\"\n");
//!
//! let back: Vec<Row> = parse_str(&text).collect::<Result<_, _>>().unwrap();
//! assert_eq!(back, rows);
//! ```

use crate::dialect::Dialect;
use crate::error::{CsvError, CsvResult};
use crate::row::Row;
use std::io::{self, Write};

/// Configuration options for [`CsvWriter`].
#[derive(Debug, Clone)]
pub struct CsvWriterConfig {
    /// Separator and escape characters; both must be ASCII.
    ///
    /// Default: `,` and `"`
    pub dialect: Dialect,

    /// When to wrap values in escape characters.
    ///
    /// Default: `QuoteStyle::Necessary`
    pub quote_style: csv::QuoteStyle,

    /// End rows with CR LF instead of LF.
    ///
    /// Default: false
    pub crlf: bool,
}

impl Default for CsvWriterConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            quote_style: csv::QuoteStyle::Necessary,
            crlf: false,
        }
    }
}

/// Writes rows in a given dialect.
pub struct CsvWriter<W: Write> {
    inner: csv::Writer<W>,
    rows_written: usize,
}

impl<W: Write> CsvWriter<W> {
    /// Create a writer with the default configuration.
    pub fn new(writer: W) -> Self {
        Self::build(writer, &CsvWriterConfig::default())
    }

    /// Create a writer with custom configuration.
    ///
    /// # Errors
    ///
    /// `CsvError::NonAsciiDialect` when the separator or escape character
    /// does not fit in one byte.
    pub fn with_config(writer: W, config: CsvWriterConfig) -> CsvResult<Self> {
        let dialect = config.dialect;
        if !dialect.separator().is_ascii() || !dialect.escape().is_ascii() {
            return Err(CsvError::NonAsciiDialect {
                separator: dialect.separator(),
                escape: dialect.escape(),
            });
        }
        Ok(Self::build(writer, &config))
    }

    fn build(writer: W, config: &CsvWriterConfig) -> Self {
        let terminator = if config.crlf {
            csv::Terminator::CRLF
        } else {
            csv::Terminator::Any(b'\n')
        };

        let inner = csv::WriterBuilder::new()
            .delimiter(config.dialect.separator() as u8)
            .quote(config.dialect.escape() as u8)
            .double_quote(true)
            .quote_style(config.quote_style)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        Self {
            inner,
            rows_written: 0,
        }
    }

    /// Write one row.
    pub fn write_row<I>(&mut self, fields: I) -> CsvResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.inner.write_record(fields)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of rows written so far.
    #[inline]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> CsvResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> CsvResult<W> {
        self.inner.into_inner().map_err(|e| CsvError::Io(e.into_error()))
    }
}

/// Render `rows` as a string.
pub fn to_csv_string<'r, I>(rows: I, config: CsvWriterConfig) -> CsvResult<String>
where
    I: IntoIterator<Item = &'r Row>,
{
    let mut writer = CsvWriter::with_config(Vec::new(), config)?;
    for row in rows {
        writer.write_row(row.iter())?;
    }
    let bytes = writer.into_inner()?;
    String::from_utf8(bytes)
        .map_err(|e| CsvError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Row {
        Row::new(fields.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_plain_values_unquoted() {
        let text = to_csv_string(&[row(&["a", " b ", "c"])], CsvWriterConfig::default()).unwrap();
        assert_eq!(text, "a, b ,c\n");
    }

    #[test]
    fn test_special_values_quoted() {
        let text = to_csv_string(
            &[row(&["x,y", "line\nbreak", "q\"uote"])],
            CsvWriterConfig::default(),
        )
        .unwrap();
        assert_eq!(text, "\"x,y\",\"line\nbreak\",\"q\"\"uote\"\n");
    }

    #[test]
    fn test_ragged_rows() {
        let rows = [row(&["a", "b", "c"]), row(&["d"])];
        let text = to_csv_string(&rows, CsvWriterConfig::default()).unwrap();
        assert_eq!(text, "a,b,c\nd\n");
    }

    #[test]
    fn test_custom_dialect_and_crlf() {
        let config = CsvWriterConfig {
            dialect: Dialect::new(';', '\'').unwrap(),
            crlf: true,
            ..Default::default()
        };
        let text = to_csv_string(&[row(&["it's", "a;b"])], config).unwrap();
        assert_eq!(text, "'it''s';'a;b'\r\n");
    }

    #[test]
    fn test_non_ascii_dialect_rejected() {
        let config = CsvWriterConfig {
            dialect: Dialect::new('§', '"').unwrap(),
            ..Default::default()
        };
        assert!(matches!(
            CsvWriter::with_config(Vec::new(), config),
            Err(CsvError::NonAsciiDialect { separator: '§', .. })
        ));
    }

    #[test]
    fn test_rows_written() {
        let mut writer = CsvWriter::new(Vec::new());
        writer.write_row(["a", "b"]).unwrap();
        writer.write_row(["c"]).unwrap();
        assert_eq!(writer.rows_written(), 2);
        let bytes = writer.into_inner().unwrap();
        assert_eq!(bytes, b"a,b\nc\n");
    }
}
