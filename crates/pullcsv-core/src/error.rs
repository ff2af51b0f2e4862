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

//! Error types for character streams and lazy sequences.
//!
//! # Error Categories
//!
//! - **I/O Errors**: Problems reading the underlying source
//! - **Encoding Errors**: Input bytes that are not valid UTF-8
//! - **End of Data**: Consuming past the end of a stream or sequence
//! - **Mark Errors**: Unsupported, missing, or invalidated bookmarks
//! - **Poisoning**: A sequence whose fetch failed or never completed
//!
//! `EndOfData` is the normal termination signal of the pull protocol rather
//! than a fault; it is returned deterministically on every consuming call
//! once a stream or sequence is exhausted.
//!
//! # Examples
//!
//! ```rust
//! use pullcsv_core::{PeekableStream, StrSource, StreamError};
//!
//! let mut stream = PeekableStream::new(StrSource::new(""));
//! match stream.next_char() {
//!     Err(StreamError::EndOfData) => {}
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror::Error;

/// Errors that can occur while reading characters or pulling elements.
#[derive(Error, Debug)]
pub enum StreamError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 encoding.
    #[error("Invalid UTF-8 at byte {offset}: {message}")]
    Utf8 { offset: usize, message: String },

    /// Attempted to consume past the end of data.
    #[error("End of data consumed")]
    EndOfData,

    /// The source does not support `mark`/`reset`.
    #[error("Mark/reset not supported by this source")]
    MarkUnsupported,

    /// `reset` was called without a prior `mark`.
    #[error("Reset called without a mark")]
    NoMark,

    /// More characters were read than the mark's read-ahead limit allows.
    #[error("Mark invalidated: read-ahead limit of {limit} characters exceeded")]
    MarkInvalidated { limit: usize },

    /// A previous fetch failed; the sequence is permanently unusable.
    #[error("Sequence poisoned: {cause}")]
    Poisoned { cause: String },

    /// A fetch was entered while another one had not completed.
    #[error("Fetch re-entered while a previous fetch was still in flight")]
    FetchInterrupted,
}

impl StreamError {
    /// Create a poisoning error carrying the original cause.
    #[inline]
    pub fn poisoned(cause: impl Into<String>) -> Self {
        Self::Poisoned {
            cause: cause.into(),
        }
    }

    /// Whether this is the end-of-data signal rather than a fault.
    #[inline]
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, Self::EndOfData)
    }

    /// Get the byte offset if available.
    #[inline]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Utf8 { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;
