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

//! Peekable character stream.
//!
//! Wraps a [`CharSource`] with one character of lookahead and bookmarking.
//! The cursor is always in exactly one of three states:
//!
//! - `NeedsFetch`: nothing cached, the next query reads from the source
//! - `Peeked(c)`: `c` was read from the source but not yet consumed
//! - `EndOfData`: the source is exhausted
//!
//! A character is read from the source at most once per logical position;
//! only an explicit [`reset`](PeekableStream::reset) causes a re-read.

use crate::error::{StreamError, StreamResult};
use crate::source::CharSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    NeedsFetch,
    Peeked(char),
    EndOfData,
}

/// Snapshot taken by [`PeekableStream::mark`].
#[derive(Debug, Clone, Copy)]
struct Mark {
    cursor: Cursor,
    position: usize,
}

/// Character stream with one-character lookahead and mark/reset.
///
/// # Examples
///
/// ## Peeking and Consuming
///
/// ```rust
/// use pullcsv_core::{PeekableStream, StrSource};
///
/// let mut stream = PeekableStream::new(StrSource::new("ab"));
/// assert_eq!(stream.peek().unwrap(), 'a');
/// assert_eq!(stream.peek().unwrap(), 'a');
/// assert_eq!(stream.next_char().unwrap(), 'a');
/// assert_eq!(stream.next_char().unwrap(), 'b');
/// assert!(!stream.has_next().unwrap());
/// assert!(stream.next_char().unwrap_err().is_end_of_data());
/// ```
///
/// ## Rewinding
///
/// ```rust
/// use pullcsv_core::{PeekableStream, StrSource};
///
/// let mut stream = PeekableStream::new(StrSource::new("xyz"));
/// stream.peek().unwrap();
/// stream.mark(16).unwrap();
/// assert_eq!(stream.next_char().unwrap(), 'x');
/// assert_eq!(stream.next_char().unwrap(), 'y');
/// stream.reset().unwrap();
/// assert_eq!(stream.next_char().unwrap(), 'x');
/// ```
#[derive(Debug)]
pub struct PeekableStream<S: CharSource> {
    source: S,
    cursor: Cursor,
    position: usize,
    mark: Option<Mark>,
}

impl<S: CharSource> PeekableStream<S> {
    /// Wrap `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cursor: Cursor::NeedsFetch,
            position: 0,
            mark: None,
        }
    }

    /// Number of characters consumed so far.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.position
    }

    /// Give back the source.
    ///
    /// A peeked but unconsumed character is lost; the source has already
    /// moved past it.
    pub fn into_inner(self) -> S {
        self.source
    }

    fn fill(&mut self) -> StreamResult<Cursor> {
        if self.cursor == Cursor::NeedsFetch {
            self.cursor = match self.source.read_char()? {
                Some(c) => Cursor::Peeked(c),
                None => Cursor::EndOfData,
            };
        }
        Ok(self.cursor)
    }

    /// Whether another character is available.
    pub fn has_next(&mut self) -> StreamResult<bool> {
        Ok(matches!(self.fill()?, Cursor::Peeked(_)))
    }

    /// Next character without consuming it, or `None` at end of data.
    pub fn peek_opt(&mut self) -> StreamResult<Option<char>> {
        match self.fill()? {
            Cursor::Peeked(c) => Ok(Some(c)),
            _ => Ok(None),
        }
    }

    /// Next character without consuming it.
    ///
    /// # Errors
    ///
    /// `StreamError::EndOfData` when no characters remain.
    pub fn peek(&mut self) -> StreamResult<char> {
        self.peek_opt()?.ok_or(StreamError::EndOfData)
    }

    /// Consume and return the next character.
    ///
    /// # Errors
    ///
    /// `StreamError::EndOfData` when no characters remain.
    pub fn next_char(&mut self) -> StreamResult<char> {
        match self.fill()? {
            Cursor::Peeked(c) => {
                self.cursor = Cursor::NeedsFetch;
                self.position += 1;
                Ok(c)
            }
            _ => Err(StreamError::EndOfData),
        }
    }

    /// Consume the next character if it satisfies `pred`.
    pub fn next_if(&mut self, pred: impl FnOnce(char) -> bool) -> StreamResult<Option<char>> {
        match self.fill()? {
            Cursor::Peeked(c) if pred(c) => {
                self.cursor = Cursor::NeedsFetch;
                self.position += 1;
                Ok(Some(c))
            }
            _ => Ok(None),
        }
    }

    /// Consume characters while `pred` holds; returns how many were skipped.
    pub fn skip_chars_while(&mut self, pred: impl Fn(char) -> bool) -> StreamResult<usize> {
        let mut skipped = 0;
        while self.next_if(&pred)?.is_some() {
            skipped += 1;
        }
        Ok(skipped)
    }

    /// Whether the source supports bookmarking.
    #[inline]
    pub fn mark_supported(&self) -> bool {
        self.source.mark_supported()
    }

    /// Bookmark the current position.
    ///
    /// Delegates to the source and snapshots the cursor, so a later
    /// [`reset`](Self::reset) yields the same next `peek`/`next_char`
    /// result as right now.
    pub fn mark(&mut self, read_ahead_limit: usize) -> StreamResult<()> {
        self.source.mark(read_ahead_limit)?;
        self.mark = Some(Mark {
            cursor: self.cursor,
            position: self.position,
        });
        Ok(())
    }

    /// Rewind to the last bookmark.
    ///
    /// The cursor is only restored once the source has rewound successfully.
    pub fn reset(&mut self) -> StreamResult<()> {
        let mark = self.mark.ok_or(StreamError::NoMark)?;
        self.source.reset()?;
        self.cursor = mark.cursor;
        self.position = mark.position;
        Ok(())
    }

    /// Bulk read into `buf`.
    ///
    /// A pending peeked character is drained into `buf[0]` first and the
    /// rest of the request goes to the source. A short read from the source
    /// moves the cursor to end of data. Returns the total number of
    /// characters written, including the drained one.
    pub fn read(&mut self, buf: &mut [char]) -> StreamResult<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let drained = match self.cursor {
            Cursor::EndOfData => return Ok(0),
            Cursor::Peeked(c) => {
                buf[0] = c;
                self.cursor = Cursor::NeedsFetch;
                1
            }
            Cursor::NeedsFetch => 0,
        };

        let requested = buf.len() - drained;
        let read = if requested > 0 {
            self.source.read_chars(&mut buf[drained..])?
        } else {
            0
        };
        if read < requested {
            self.cursor = Cursor::EndOfData;
        }

        let total = drained + read;
        self.position += total;
        Ok(total)
    }
}

impl<S: CharSource> Iterator for PeekableStream<S> {
    type Item = StreamResult<char>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_char() {
            Ok(c) => Some(Ok(c)),
            Err(StreamError::EndOfData) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StrSource;

    /// Source that counts how often it is asked for a character.
    struct Counting<'a> {
        inner: StrSource<'a>,
        reads: usize,
    }

    impl<'a> Counting<'a> {
        fn new(input: &'a str) -> Self {
            Self {
                inner: StrSource::new(input),
                reads: 0,
            }
        }
    }

    impl CharSource for Counting<'_> {
        fn read_char(&mut self) -> StreamResult<Option<char>> {
            self.reads += 1;
            self.inner.read_char()
        }
    }

    fn stream(input: &str) -> PeekableStream<StrSource<'_>> {
        PeekableStream::new(StrSource::new(input))
    }

    // ==================== Lookahead tests ====================

    #[test]
    fn test_has_next_fetches_once() {
        let mut source = Counting::new("ab");
        let mut s = PeekableStream::new(&mut source);
        assert!(s.has_next().unwrap());
        assert!(s.has_next().unwrap());
        assert_eq!(s.peek().unwrap(), 'a');
        drop(s);
        assert_eq!(source.reads, 1);
    }

    #[test]
    fn test_end_of_data_fetched_once() {
        let mut source = Counting::new("");
        let mut s = PeekableStream::new(&mut source);
        assert!(!s.has_next().unwrap());
        assert!(!s.has_next().unwrap());
        assert!(s.peek().unwrap_err().is_end_of_data());
        assert!(s.next_char().unwrap_err().is_end_of_data());
        drop(s);
        assert_eq!(source.reads, 1);
    }

    #[test]
    fn test_next_consumes() {
        let mut s = stream("abc");
        assert_eq!(s.next_char().unwrap(), 'a');
        assert_eq!(s.peek().unwrap(), 'b');
        assert_eq!(s.next_char().unwrap(), 'b');
        assert_eq!(s.next_char().unwrap(), 'c');
        assert_eq!(s.consumed(), 3);
        assert!(s.next_char().unwrap_err().is_end_of_data());
        assert!(s.next_char().unwrap_err().is_end_of_data());
    }

    #[test]
    fn test_next_if_and_skip_chars_while() {
        let mut s = stream("  \tx");
        assert_eq!(s.skip_chars_while(|c| c == ' ' || c == '\t').unwrap(), 3);
        assert_eq!(s.next_if(|c| c == 'y').unwrap(), None);
        assert_eq!(s.next_if(|c| c == 'x').unwrap(), Some('x'));
        assert_eq!(s.next_if(|_| true).unwrap(), None);
    }

    #[test]
    fn test_cursor_methods_through_mut_ref() {
        fn skip_and_count<S: CharSource>(s: &mut PeekableStream<S>) -> usize {
            s.skip_chars_while(|c| c == ' ').unwrap();
            s.consumed()
        }

        let mut s = stream("  ab");
        assert_eq!(skip_and_count(&mut s), 2);
        assert_eq!(s.next_char().unwrap(), 'a');
        assert_eq!(s.consumed(), 3);
    }

    #[test]
    fn test_iterator() {
        let chars: Vec<char> = stream("héllo").map(|r| r.unwrap()).collect();
        assert_eq!(chars, vec!['h', 'é', 'l', 'l', 'o']);
    }

    // ==================== Mark/reset tests ====================

    #[test]
    fn test_mark_reset_with_peeked_char() {
        let mut s = stream("abc");
        assert_eq!(s.peek().unwrap(), 'a');
        s.mark(10).unwrap();
        assert_eq!(s.next_char().unwrap(), 'a');
        assert_eq!(s.next_char().unwrap(), 'b');
        s.reset().unwrap();
        assert_eq!(s.consumed(), 0);
        assert_eq!(s.peek().unwrap(), 'a');
        assert_eq!(s.next_char().unwrap(), 'a');
        assert_eq!(s.next_char().unwrap(), 'b');
        assert_eq!(s.next_char().unwrap(), 'c');
    }

    #[test]
    fn test_mark_reset_without_peek() {
        let mut s = stream("abc");
        s.next_char().unwrap();
        s.mark(10).unwrap();
        assert_eq!(s.next_char().unwrap(), 'b');
        s.reset().unwrap();
        assert_eq!(s.next_char().unwrap(), 'b');
        assert_eq!(s.consumed(), 2);
    }

    #[test]
    fn test_mark_at_end_of_data() {
        let mut s = stream("a");
        s.next_char().unwrap();
        assert!(!s.has_next().unwrap());
        s.mark(1).unwrap();
        s.reset().unwrap();
        assert!(!s.has_next().unwrap());
    }

    #[test]
    fn test_reset_without_mark() {
        let mut s = stream("a");
        assert!(matches!(s.reset(), Err(StreamError::NoMark)));
    }

    #[test]
    fn test_mark_unsupported_leaves_no_snapshot() {
        let mut s = PeekableStream::new(Counting::new("ab"));
        assert!(!s.mark_supported());
        assert!(matches!(s.mark(4), Err(StreamError::MarkUnsupported)));
        assert!(matches!(s.reset(), Err(StreamError::NoMark)));
    }

    // ==================== Bulk read tests ====================

    #[test]
    fn test_read_drains_peeked_char() {
        let mut s = stream("abcd");
        assert_eq!(s.peek().unwrap(), 'a');
        let mut buf = ['\0'; 3];
        assert_eq!(s.read(&mut buf).unwrap(), 3);
        assert_eq!(buf, ['a', 'b', 'c']);
        assert_eq!(s.next_char().unwrap(), 'd');
    }

    #[test]
    fn test_read_short_moves_to_end() {
        let mut source = Counting::new("ab");
        let mut s = PeekableStream::new(&mut source);
        assert_eq!(s.peek().unwrap(), 'a');
        let mut buf = ['\0'; 8];
        assert_eq!(s.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &['a', 'b']);
        assert_eq!(s.consumed(), 2);
        assert!(!s.has_next().unwrap());
        assert_eq!(s.read(&mut buf).unwrap(), 0);
        drop(s);
        // One fetch for the peek, two inside the bulk read.
        assert_eq!(source.reads, 3);
    }

    #[test]
    fn test_read_single_slot_only_drains() {
        let mut s = stream("ab");
        s.peek().unwrap();
        let mut buf = ['\0'; 1];
        assert_eq!(s.read(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], 'a');
        assert_eq!(s.next_char().unwrap(), 'b');
    }

    #[test]
    fn test_read_empty_buffer() {
        let mut s = stream("ab");
        assert_eq!(s.read(&mut []).unwrap(), 0);
        assert_eq!(s.next_char().unwrap(), 'a');
    }

    #[test]
    fn test_into_inner() {
        let mut s = stream("abc");
        s.next_char().unwrap();
        assert_eq!(s.into_inner().remaining(), "bc");
    }
}
