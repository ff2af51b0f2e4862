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

//! Character streams and lazy sequences for pullcsv.
//!
//! This crate holds the parser-agnostic building blocks the CSV parser in
//! `pullcsv` is made of:
//!
//! - **Sources**: [`CharSource`] with in-memory ([`StrSource`]) and
//!   byte-reader ([`ReaderSource`]) implementations
//! - **Peekable Stream**: [`PeekableStream`], one character of lookahead plus
//!   mark/reset over any source
//! - **Lazy Sequences**: [`LazySeq`], a pull sequence driven by a step
//!   function that returns [`Step::Yield`] or [`Step::Done`]
//!
//! Everything here is single-owner and sequential. A stream or sequence is
//! driven through `&mut self`, so two parses can never share one.
//!
//! ```rust
//! use pullcsv_core::{lazy_seq, PeekableStream, Step, StrSource};
//!
//! let mut stream = PeekableStream::new(StrSource::new("a b c"));
//! let words = lazy_seq(move || {
//!     stream.skip_chars_while(|c| c == ' ')?;
//!     let mut word = String::new();
//!     while let Some(c) = stream.next_if(|c| c != ' ')? {
//!         word.push(c);
//!     }
//!     Ok(if word.is_empty() { Step::Done } else { Step::Yield(word) })
//! });
//!
//! let words: Vec<String> = words.collect::<Result<_, _>>().unwrap();
//! assert_eq!(words, vec!["a", "b", "c"]);
//! ```

mod error;
mod lazy;
mod peekable;
mod source;

pub use error::{StreamError, StreamResult};
pub use lazy::{lazy_from_iter, lazy_seq, LazySeq, Step};
pub use peekable::PeekableStream;
pub use source::{CharSource, ReaderSource, StrSource, DEFAULT_BUFFER_SIZE};
