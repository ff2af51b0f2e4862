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

//! Streaming CSV-Dialect Parser
//!
//! A single-pass parser that reads characters one at a time through a
//! [`PeekableStream`](pullcsv_core::PeekableStream) and hands out rows as a
//! lazy sequence. Nothing is parsed before it is requested, and nothing is
//! buffered beyond the row being built.
//!
//! # Features
//!
//! - **Configurable Dialect**: any separator/escape pair, validated up front
//! - **Lazy Rows**: [`Rows`] parses one row per request
//! - **Lenient by Default**: malformed quoting degrades instead of failing;
//!   strict mode is opt-in
//! - **Any Source**: strings, byte readers, or a custom
//!   [`CharSource`](pullcsv_core::CharSource)
//! - **Writer**: [`CsvWriter`] produces text the parser reads back unchanged
//!
//! # Parsing
//!
//! ```rust
//! use pullcsv::{CsvParser, CsvParserConfig, Dialect};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let parser = CsvParser::with_config(CsvParserConfig {
//!     dialect: Dialect::new('\t', '"')?,
//!     ..Default::default()
//! });
//!
//! let mut total = 0;
//! for row in parser.rows_from_str("id\tname\n1\t\"Smith, J\"\r\n2\tDoe") {
//!     let row = row?;
//!     total += row.len();
//! }
//! assert_eq!(total, 6);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Dialect Errors
//!
//! Illegal dialects are rejected before any input is touched:
//!
//! ```rust
//! use pullcsv::{CsvError, Dialect};
//!
//! assert!(matches!(
//!     Dialect::new('\n', '"'),
//!     Err(CsvError::IllegalDialect { .. })
//! ));
//! ```

mod dialect;
mod error;
mod parser;
mod row;
mod writer;

pub use dialect::{validate_dialect, Dialect, DEFAULT_ESCAPE, DEFAULT_SEPARATOR};
pub use error::{CsvError, CsvResult};
pub use parser::{parse_reader, parse_str, read_new_line, CsvParser, CsvParserConfig, Rows};
pub use row::Row;
pub use writer::{to_csv_string, CsvWriter, CsvWriterConfig};

/// Re-export the stream layer for custom sources.
pub use pullcsv_core::{CharSource, PeekableStream, ReaderSource, StrSource, StreamError};
