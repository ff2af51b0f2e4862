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

//! Sequential character sources.
//!
//! A [`CharSource`] is the only thing the parser needs from its environment:
//! something that hands out characters one at a time and, optionally, can
//! bookmark a position and rewind to it.
//!
//! Two sources are provided:
//!
//! - [`StrSource`]: characters of an in-memory string slice
//! - [`ReaderSource`]: UTF-8 decoded characters of any [`std::io::Read`]
//!
//! Sources are never closed by the stream or the parser. To keep ownership
//! of a source across a parse, pass `&mut source`; every `&mut S` is itself
//! a `CharSource`.

use crate::error::{StreamError, StreamResult};
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use tracing::debug;

/// A sequential source of characters.
///
/// Only [`read_char`](Self::read_char) is required. Bulk reads and
/// bookmarking have default implementations; sources that can rewind
/// override [`mark_supported`](Self::mark_supported),
/// [`mark`](Self::mark) and [`reset`](Self::reset).
pub trait CharSource {
    /// Read the next character, or `None` at end of data.
    fn read_char(&mut self) -> StreamResult<Option<char>>;

    /// Fill `buf` with as many characters as are available.
    ///
    /// Returns fewer than `buf.len()` characters only when the source is
    /// exhausted.
    fn read_chars(&mut self, buf: &mut [char]) -> StreamResult<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read_char()? {
                Some(c) => {
                    buf[filled] = c;
                    filled += 1;
                }
                None => break,
            }
        }
        Ok(filled)
    }

    /// Whether [`mark`](Self::mark) and [`reset`](Self::reset) are supported.
    fn mark_supported(&self) -> bool {
        false
    }

    /// Bookmark the current position.
    ///
    /// `read_ahead_limit` is the number of characters that may be read
    /// before the bookmark may be dropped.
    fn mark(&mut self, read_ahead_limit: usize) -> StreamResult<()> {
        let _ = read_ahead_limit;
        Err(StreamError::MarkUnsupported)
    }

    /// Rewind to the most recent bookmark.
    fn reset(&mut self) -> StreamResult<()> {
        Err(StreamError::MarkUnsupported)
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    #[inline]
    fn read_char(&mut self) -> StreamResult<Option<char>> {
        (**self).read_char()
    }

    #[inline]
    fn read_chars(&mut self, buf: &mut [char]) -> StreamResult<usize> {
        (**self).read_chars(buf)
    }

    #[inline]
    fn mark_supported(&self) -> bool {
        (**self).mark_supported()
    }

    #[inline]
    fn mark(&mut self, read_ahead_limit: usize) -> StreamResult<()> {
        (**self).mark(read_ahead_limit)
    }

    #[inline]
    fn reset(&mut self) -> StreamResult<()> {
        (**self).reset()
    }
}

/// Characters of an in-memory string slice.
///
/// The whole input is resident, so marks never expire and the read-ahead
/// limit is ignored.
///
/// # Examples
///
/// ```rust
/// use pullcsv_core::{CharSource, StrSource};
///
/// let mut source = StrSource::new("ab");
/// source.mark(0).unwrap();
/// assert_eq!(source.read_char().unwrap(), Some('a'));
/// source.reset().unwrap();
/// assert_eq!(source.read_char().unwrap(), Some('a'));
/// assert_eq!(source.read_char().unwrap(), Some('b'));
/// assert_eq!(source.read_char().unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    input: &'a str,
    pos: usize,
    mark: Option<usize>,
}

impl<'a> StrSource<'a> {
    /// Create a source over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            mark: None,
        }
    }

    /// The not yet consumed part of the input.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }
}

impl CharSource for StrSource<'_> {
    fn read_char(&mut self) -> StreamResult<Option<char>> {
        let c = self.input[self.pos..].chars().next();
        if let Some(c) = c {
            self.pos += c.len_utf8();
        }
        Ok(c)
    }

    fn mark_supported(&self) -> bool {
        true
    }

    fn mark(&mut self, _read_ahead_limit: usize) -> StreamResult<()> {
        self.mark = Some(self.pos);
        Ok(())
    }

    fn reset(&mut self) -> StreamResult<()> {
        self.pos = self.mark.ok_or(StreamError::NoMark)?;
        Ok(())
    }
}

/// Default read buffer size for [`ReaderSource`].
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug)]
struct Recording {
    chars: Vec<char>,
    limit: usize,
    valid: bool,
}

/// UTF-8 decoded characters of a byte reader.
///
/// Bytes are buffered through a [`BufReader`] and decoded one character at
/// a time. Marking records every character consumed afterwards, up to the
/// read-ahead limit; `reset` replays the recording. The mark stays in place
/// after a reset, so it can be rewound to repeatedly.
///
/// # Examples
///
/// ```rust
/// use pullcsv_core::{CharSource, ReaderSource};
/// use std::io::Cursor;
///
/// let mut source = ReaderSource::new(Cursor::new("héllo".as_bytes()));
/// source.mark(8).unwrap();
/// assert_eq!(source.read_char().unwrap(), Some('h'));
/// assert_eq!(source.read_char().unwrap(), Some('é'));
/// source.reset().unwrap();
/// assert_eq!(source.read_char().unwrap(), Some('h'));
/// ```
pub struct ReaderSource<R: Read> {
    reader: BufReader<R>,
    byte_offset: usize,
    replay: VecDeque<char>,
    recording: Option<Recording>,
}

impl<R: Read> ReaderSource<R> {
    /// Create a source with the default buffer size.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_BUFFER_SIZE)
    }

    /// Create with a specific buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            byte_offset: 0,
            replay: VecDeque::new(),
            recording: None,
        }
    }

    /// Number of bytes decoded from the reader so far.
    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Unwrap the underlying reader, dropping any buffered input.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn read_byte(&mut self) -> StreamResult<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let b = buf[0];
                    self.reader.consume(1);
                    self.byte_offset += 1;
                    return Ok(Some(b));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(StreamError::Io(e)),
            }
        }
    }

    fn decode_char(&mut self) -> StreamResult<Option<char>> {
        let start = self.byte_offset;
        let first = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };

        let width = utf8_width(first);
        if width == 0 {
            return Err(StreamError::Utf8 {
                offset: start,
                message: format!("invalid leading byte 0x{:02x}", first),
            });
        }

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            *slot = self.read_byte()?.ok_or_else(|| StreamError::Utf8 {
                offset: start,
                message: "truncated multi-byte sequence".to_string(),
            })?;
        }

        let decoded = std::str::from_utf8(&bytes[..width]).map_err(|e| StreamError::Utf8 {
            offset: start,
            message: e.to_string(),
        })?;
        Ok(decoded.chars().next())
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn read_char(&mut self) -> StreamResult<Option<char>> {
        let c = match self.replay.pop_front() {
            Some(c) => Some(c),
            None => self.decode_char()?,
        };

        if let (Some(c), Some(rec)) = (c, self.recording.as_mut()) {
            if rec.valid {
                if rec.chars.len() < rec.limit {
                    rec.chars.push(c);
                } else {
                    debug!(limit = rec.limit, "read-ahead limit exceeded, dropping mark");
                    rec.valid = false;
                    rec.chars = Vec::new();
                }
            }
        }

        Ok(c)
    }

    fn mark_supported(&self) -> bool {
        true
    }

    fn mark(&mut self, read_ahead_limit: usize) -> StreamResult<()> {
        self.recording = Some(Recording {
            chars: Vec::with_capacity(read_ahead_limit.min(DEFAULT_BUFFER_SIZE)),
            limit: read_ahead_limit,
            valid: true,
        });
        Ok(())
    }

    fn reset(&mut self) -> StreamResult<()> {
        let rec = self.recording.as_mut().ok_or(StreamError::NoMark)?;
        if !rec.valid {
            return Err(StreamError::MarkInvalidated { limit: rec.limit });
        }
        for c in rec.chars.drain(..).rev() {
            self.replay.push_front(c);
        }
        Ok(())
    }
}

/// Encoded length of a UTF-8 sequence from its leading byte, 0 if invalid.
#[inline]
fn utf8_width(b: u8) -> usize {
    match b {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
