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

//! Streaming CSV parser.
//!
//! The parser reads one character at a time from a [`PeekableStream`] and
//! never looks further ahead than the next character. Values are parsed by
//! [`CsvParser::parse_value`], rows by [`CsvParser::parse_row`], and whole
//! documents are exposed lazily through [`Rows`].
//!
//! # Quoting Rules
//!
//! - Spaces and tabs before an opening escape character are dropped
//! - Inside an escaped value, separators and line breaks are literal
//! - A doubled escape character stands for one literal escape character
//! - Spaces and tabs after the closing escape character are dropped
//! - Unescaped values keep all their whitespace
//!
//! # Leniency
//!
//! Malformed quoting is not an error by default: an unterminated quoted
//! value runs to the end of data, and text after a closing escape character
//! is appended to the value. [`CsvParserConfig::strict`] turns both into
//! errors.
//!
//! # Basic Usage
//!
//! ```rust
//! use pullcsv::parse_str;
//!
//! let rows: Vec<_> = parse_str("name,motto\nalice,\"hi, there\"\n")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1], ["alice", "hi, there"]);
//! ```

use crate::dialect::Dialect;
use crate::error::{CsvError, CsvResult};
use crate::row::Row;
use pullcsv_core::{
    CharSource, LazySeq, PeekableStream, ReaderSource, Step, StrSource, StreamResult,
    DEFAULT_BUFFER_SIZE,
};
use std::io::Read;
use tracing::{debug, trace, warn};

/// Configuration options for the CSV parser.
///
/// # Examples
///
/// ```rust
/// use pullcsv::{CsvParserConfig, Dialect};
///
/// let config = CsvParserConfig {
///     dialect: Dialect::new(';', '"').unwrap(),
///     strict: true,
///     ..Default::default()
/// };
/// assert_eq!(config.max_field_len, None);
/// ```
#[derive(Debug, Clone)]
pub struct CsvParserConfig {
    /// Separator and escape characters.
    ///
    /// Default: `,` and `"`
    pub dialect: Dialect,

    /// Report malformed quoting instead of degrading it.
    ///
    /// Default: false
    pub strict: bool,

    /// Maximum field length in bytes.
    ///
    /// Protects against unbounded memory use from a runaway quoted field.
    ///
    /// Default: None (no limit)
    pub max_field_len: Option<usize>,

    /// Read buffer size used when parsing from a byte reader.
    ///
    /// Default: 64KB
    pub buffer_size: usize,
}

impl Default for CsvParserConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            strict: false,
            max_field_len: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Consume one logical line break: LF, CR, or CR LF.
///
/// Returns whether a line break was found. Exactly the characters of that
/// one break are consumed, so `"\n\n"` takes two calls.
///
/// ```rust
/// use pullcsv::read_new_line;
/// use pullcsv_core::{PeekableStream, StrSource};
///
/// let mut stream = PeekableStream::new(StrSource::new("\r\nx"));
/// assert!(read_new_line(&mut stream).unwrap());
/// assert_eq!(stream.peek().unwrap(), 'x');
/// assert!(!read_new_line(&mut stream).unwrap());
/// ```
pub fn read_new_line<S: CharSource>(stream: &mut PeekableStream<S>) -> StreamResult<bool> {
    if stream.next_if(|c| c == '\n')?.is_some() {
        return Ok(true);
    }
    if stream.next_if(|c| c == '\r')?.is_some() {
        stream.next_if(|c| c == '\n')?;
        return Ok(true);
    }
    Ok(false)
}

#[inline]
fn is_plain_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Streaming CSV parser for one dialect.
///
/// A parser holds only configuration; all position state lives in the
/// stream passed to each call. It can therefore parse values from several
/// streams one after another, but every stream is driven by one call at a
/// time.
///
/// # Examples
///
/// ## Parsing Values
///
/// ```rust
/// use pullcsv::CsvParser;
/// use pullcsv_core::{PeekableStream, StrSource};
///
/// let parser = CsvParser::default();
/// let mut stream = PeekableStream::new(StrSource::new(r#" "A""B" ,C"#));
///
/// assert_eq!(parser.parse_value(&mut stream).unwrap(), "A\"B");
/// assert_eq!(stream.next_char().unwrap(), ',');
/// assert_eq!(parser.parse_value(&mut stream).unwrap(), "C");
/// ```
///
/// ## Streaming Rows From a Reader
///
/// ```rust
/// use pullcsv::{CsvParser, CsvParserConfig, Dialect};
/// use std::io::Cursor;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let parser = CsvParser::with_config(CsvParserConfig {
///     dialect: Dialect::new(';', '\'')?,
///     ..Default::default()
/// });
///
/// let input = Cursor::new("a;'b;c'\n1;2\n");
/// for row in parser.rows_from_reader(input) {
///     let row = row?;
///     println!("{} fields", row.len());
/// }
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    config: CsvParserConfig,
}

impl CsvParser {
    /// Create a parser for `dialect` with otherwise default settings.
    pub fn new(dialect: Dialect) -> Self {
        Self::with_config(CsvParserConfig {
            dialect,
            ..Default::default()
        })
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: CsvParserConfig) -> Self {
        debug!(
            separator = ?config.dialect.separator(),
            escape = ?config.dialect.escape(),
            strict = config.strict,
            "created CSV parser"
        );
        Self { config }
    }

    /// The parser's configuration.
    #[inline]
    pub fn config(&self) -> &CsvParserConfig {
        &self.config
    }

    /// The parser's dialect.
    #[inline]
    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    /// Whether `c` ends an unescaped value under this parser's dialect.
    #[inline]
    pub fn is_separator_or_newline(&self, c: char) -> bool {
        self.config.dialect.is_separator_or_newline(c)
    }

    /// Space or tab that is acting as neither the separator nor the escape.
    #[inline]
    fn is_padding(&self, c: char) -> bool {
        is_plain_whitespace(c)
            && c != self.config.dialect.separator()
            && c != self.config.dialect.escape()
    }

    /// Parse one value.
    ///
    /// Stops in front of the separator, line break, or end of data that ends
    /// the value; that boundary is left unconsumed. On empty input, returns
    /// an empty string without consuming anything.
    ///
    /// # Errors
    ///
    /// - `CsvError::Stream`: the source failed
    /// - `CsvError::FieldTooLong`: `max_field_len` exceeded
    /// - `CsvError::UnterminatedQuote`, `CsvError::UnexpectedCharacter`:
    ///   malformed quoting, strict mode only
    pub fn parse_value<S: CharSource>(&self, stream: &mut PeekableStream<S>) -> CsvResult<String> {
        let start = stream.consumed();
        let escape = self.config.dialect.escape();

        // Leading whitespace is part of the value unless a quote follows it,
        // so it only counts toward the length limit once that is known.
        let mut lead = String::new();
        let mut lead_overflow = None;
        let escaped = loop {
            match stream.peek_opt()? {
                Some(c) if c == escape => {
                    stream.next_char()?;
                    break true;
                }
                Some(c) if self.is_padding(c) => {
                    stream.next_char()?;
                    match self.config.max_field_len {
                        Some(limit) if lead.len() + c.len_utf8() > limit => {
                            lead_overflow = Some(limit);
                        }
                        _ => lead.push(c),
                    }
                }
                _ => break false,
            }
        };

        if escaped {
            let mut value = String::new();
            self.read_escaped(stream, &mut value, start)?;
            self.read_after_closing(stream, &mut value, start)?;
            return Ok(value);
        }

        if let Some(limit) = lead_overflow {
            return Err(CsvError::FieldTooLong { start, limit });
        }
        let mut value = lead;
        self.read_unescaped(stream, &mut value, start)?;
        Ok(value)
    }

    fn push(&self, value: &mut String, c: char, start: usize) -> CsvResult<()> {
        if let Some(limit) = self.config.max_field_len {
            if value.len() + c.len_utf8() > limit {
                return Err(CsvError::FieldTooLong { start, limit });
            }
        }
        value.push(c);
        Ok(())
    }

    fn read_unescaped<S: CharSource>(
        &self,
        stream: &mut PeekableStream<S>,
        value: &mut String,
        start: usize,
    ) -> CsvResult<()> {
        while let Some(c) = stream.next_if(|c| !self.is_separator_or_newline(c))? {
            self.push(value, c, start)?;
        }
        Ok(())
    }

    /// Body of an escaped value, up to and including its closing escape.
    fn read_escaped<S: CharSource>(
        &self,
        stream: &mut PeekableStream<S>,
        value: &mut String,
        start: usize,
    ) -> CsvResult<()> {
        let escape = self.config.dialect.escape();
        loop {
            match stream.peek_opt()? {
                None => {
                    if self.config.strict {
                        return Err(CsvError::UnterminatedQuote { start });
                    }
                    warn!(start, "unterminated quoted value, keeping text up to end of data");
                    return Ok(());
                }
                Some(c) if c == escape => {
                    if !self.read_escaper_and_is_control_char(stream, value, start)? {
                        return Ok(());
                    }
                }
                Some(c) => {
                    stream.next_char()?;
                    self.push(value, c, start)?;
                }
            }
        }
    }

    /// Consume an escape character met inside an escaped value.
    ///
    /// A doubled escape appends one literal escape character and returns
    /// `true` (the value continues). Anything else closes the value and
    /// returns `false`.
    fn read_escaper_and_is_control_char<S: CharSource>(
        &self,
        stream: &mut PeekableStream<S>,
        value: &mut String,
        start: usize,
    ) -> CsvResult<bool> {
        let escape = self.config.dialect.escape();
        stream.next_char()?;
        if stream.next_if(|c| c == escape)?.is_some() {
            self.push(value, escape, start)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Drop trailing whitespace after a closing escape; handle stray text.
    fn read_after_closing<S: CharSource>(
        &self,
        stream: &mut PeekableStream<S>,
        value: &mut String,
        start: usize,
    ) -> CsvResult<()> {
        stream.skip_chars_while(|c| self.is_padding(c))?;

        match stream.peek_opt()? {
            Some(c) if !self.is_separator_or_newline(c) => {
                if self.config.strict {
                    return Err(CsvError::UnexpectedCharacter {
                        position: stream.consumed(),
                        found: c,
                    });
                }
                warn!(
                    position = stream.consumed(),
                    "text after closing quote, appending to value"
                );
                self.read_unescaped(stream, value, start)
            }
            _ => Ok(()),
        }
    }

    /// Parse one row, or `None` if the stream is already at end of data.
    ///
    /// Values are read until a line break (consumed) or end of data. A blank
    /// line is a row with one empty field.
    ///
    /// ```rust
    /// use pullcsv::CsvParser;
    /// use pullcsv_core::{PeekableStream, StrSource};
    ///
    /// let parser = CsvParser::default();
    /// let mut stream = PeekableStream::new(StrSource::new("a,b\n\n"));
    ///
    /// assert_eq!(parser.parse_row(&mut stream).unwrap().unwrap(), ["a", "b"]);
    /// assert_eq!(parser.parse_row(&mut stream).unwrap().unwrap(), [""]);
    /// assert!(parser.parse_row(&mut stream).unwrap().is_none());
    /// ```
    pub fn parse_row<S: CharSource>(
        &self,
        stream: &mut PeekableStream<S>,
    ) -> CsvResult<Option<Row>> {
        if !stream.has_next()? {
            return Ok(None);
        }

        let separator = self.config.dialect.separator();
        let mut fields = Vec::new();
        loop {
            fields.push(self.parse_value(stream)?);
            if stream.next_if(|c| c == separator)?.is_none() {
                // parse_value only stops at a boundary: a line break or the end.
                read_new_line(stream)?;
                break;
            }
        }

        Ok(Some(Row::new(fields)))
    }

    /// Turn the parser and a stream into a lazy sequence of rows.
    ///
    /// No row is parsed before it is requested. The stream (and the source
    /// inside it) is owned by the sequence; pass `&mut source` into the
    /// stream to keep the source afterwards.
    pub fn rows<'a, S: CharSource + 'a>(self, mut stream: PeekableStream<S>) -> Rows<'a> {
        let mut count = 0usize;
        let step: RowStep<'a> = Box::new(move || -> CsvResult<Step<Row>> {
            match self.parse_row(&mut stream)? {
                Some(row) => {
                    count += 1;
                    trace!(row = count, fields = row.len(), "parsed row");
                    Ok(Step::Yield(row))
                }
                None => {
                    debug!(rows = count, "end of CSV data");
                    Ok(Step::Done)
                }
            }
        });

        Rows {
            seq: LazySeq::new(step),
        }
    }

    /// Lazily parse rows from a string slice.
    pub fn rows_from_str(self, input: &str) -> Rows<'_> {
        self.rows(PeekableStream::new(StrSource::new(input)))
    }

    /// Lazily parse rows from UTF-8 bytes.
    pub fn rows_from_reader<'a, R: Read + 'a>(self, reader: R) -> Rows<'a> {
        let source = ReaderSource::with_capacity(reader, self.config.buffer_size);
        self.rows(PeekableStream::new(source))
    }
}

type RowStep<'a> = Box<dyn FnMut() -> CsvResult<Step<Row>> + 'a>;

/// Lazy sequence of parsed rows.
///
/// Built by [`CsvParser::rows`]. Rows are parsed one at a time on demand,
/// in input order, until the source is exhausted.
///
/// After a parse error the sequence is poisoned: the failing call returns
/// the original error and every later call fails with
/// `StreamError::Poisoned` carrying its message. As an iterator it yields
/// the error once and then ends.
///
/// ```rust
/// use pullcsv::parse_str;
///
/// let mut rows = parse_str("a\nb");
/// assert!(rows.has_next().unwrap());
/// assert_eq!(rows.peek().unwrap().unwrap(), ["a"]);
/// assert_eq!(rows.next_row().unwrap(), ["a"]);
/// assert_eq!(rows.next_row().unwrap(), ["b"]);
/// assert!(rows.next_row().unwrap_err().is_end_of_data());
/// ```
pub struct Rows<'a> {
    seq: LazySeq<Row, RowStep<'a>, CsvError>,
}

impl Rows<'_> {
    /// Whether another row exists, parsing it if necessary.
    pub fn has_next(&mut self) -> CsvResult<bool> {
        self.seq.has_next()
    }

    /// The next row without taking it.
    pub fn peek(&mut self) -> CsvResult<Option<&Row>> {
        self.seq.peek()
    }

    /// Take the next row.
    ///
    /// # Errors
    ///
    /// End of data is reported as `CsvError::Stream(StreamError::EndOfData)`;
    /// see [`CsvError::is_end_of_data`].
    pub fn next_row(&mut self) -> CsvResult<Row> {
        self.seq.next_item()
    }

    /// Whether a parse error made the sequence unusable.
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        self.seq.is_poisoned()
    }
}

impl Iterator for Rows<'_> {
    type Item = CsvResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.seq.next()
    }
}

impl std::iter::FusedIterator for Rows<'_> {}

impl std::fmt::Debug for Rows<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rows").field("seq", &self.seq).finish()
    }
}

/// Lazily parse `input` with the default dialect.
pub fn parse_str(input: &str) -> Rows<'_> {
    CsvParser::default().rows_from_str(input)
}

/// Lazily parse UTF-8 bytes from `reader` with the default dialect.
pub fn parse_reader<'a, R: Read + 'a>(reader: R) -> Rows<'a> {
    CsvParser::default().rows_from_reader(reader)
}
