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

//! Lazy pull sequences.
//!
//! [`LazySeq`] turns a step function into a sequence with one element of
//! lookahead. The step function computes the next element on demand and
//! returns either [`Step::Yield`] or [`Step::Done`]; nothing is computed
//! before a caller asks for it.
//!
//! # States
//!
//! | State | Meaning |
//! |---|---|
//! | `AwaitingFetch` | no element cached, next query runs the step |
//! | `Fetching` | the step is running |
//! | `Cached(v)` | `v` computed, not yet taken |
//! | `Ended` | the step reported `Done` (terminal) |
//! | `Poisoned(cause)` | a step failed or never returned (terminal) |
//!
//! A sequence observed in `Fetching` on entry had its step unwind through
//! it; that sequence is poisoned rather than trusted again.
//!
//! # Examples
//!
//! ```rust
//! use pullcsv_core::{lazy_seq, Step};
//!
//! let mut n = 0;
//! let mut seq = lazy_seq(move || {
//!     n += 1;
//!     Ok(if n <= 3 { Step::Yield(n) } else { Step::Done })
//! });
//!
//! assert_eq!(seq.peek().unwrap(), Some(&1));
//! assert_eq!(seq.next_item().unwrap(), 1);
//! let rest: Vec<_> = seq.map(|r| r.unwrap()).collect();
//! assert_eq!(rest, vec![2, 3]);
//! ```

use crate::error::{StreamError, StreamResult};
use std::fmt;
use std::iter::FusedIterator;
use tracing::debug;

/// Outcome of one step of a lazy sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// The next element.
    Yield(T),
    /// No more elements.
    Done,
}

impl<T> From<Option<T>> for Step<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Step::Yield(v),
            None => Step::Done,
        }
    }
}

enum SeqState<T> {
    AwaitingFetch,
    Fetching,
    Cached(T),
    Ended,
    Poisoned(String),
}

/// A sequence computed on demand by a step function.
///
/// `E` is the step's error type. It must absorb [`StreamError`] so the
/// sequence can report end of data and poisoning in the caller's own error
/// type.
pub struct LazySeq<T, F, E = StreamError> {
    step: F,
    state: SeqState<T>,
    _error: std::marker::PhantomData<fn() -> E>,
}

impl<T, F, E> LazySeq<T, F, E>
where
    F: FnMut() -> Result<Step<T>, E>,
    E: From<StreamError> + fmt::Display,
{
    /// Create a sequence driven by `step`.
    pub fn new(step: F) -> Self {
        Self {
            step,
            state: SeqState::AwaitingFetch,
            _error: std::marker::PhantomData,
        }
    }

    fn fetch(&mut self) -> Result<(), E> {
        match self.state {
            SeqState::AwaitingFetch => {}
            SeqState::Fetching => {
                let err = StreamError::FetchInterrupted;
                debug!("lazy sequence poisoned: {}", err);
                self.state = SeqState::Poisoned(err.to_string());
                return Err(err.into());
            }
            SeqState::Poisoned(ref cause) => {
                return Err(StreamError::poisoned(cause.clone()).into());
            }
            SeqState::Cached(_) | SeqState::Ended => return Ok(()),
        }

        self.state = SeqState::Fetching;
        match (self.step)() {
            Ok(Step::Yield(value)) => self.state = SeqState::Cached(value),
            Ok(Step::Done) => self.state = SeqState::Ended,
            Err(e) => {
                debug!("lazy sequence poisoned: {}", e);
                self.state = SeqState::Poisoned(e.to_string());
                return Err(e);
            }
        }
        Ok(())
    }

    fn take_cached(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.state, SeqState::AwaitingFetch) {
            SeqState::Cached(value) => Some(value),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Whether another element exists, computing it if necessary.
    ///
    /// The step runs at most once per element.
    pub fn has_next(&mut self) -> Result<bool, E> {
        self.fetch()?;
        Ok(matches!(self.state, SeqState::Cached(_)))
    }

    /// The next element without taking it, or `None` at the end.
    pub fn peek(&mut self) -> Result<Option<&T>, E> {
        self.fetch()?;
        match &self.state {
            SeqState::Cached(value) => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    /// Take the next element.
    ///
    /// # Errors
    ///
    /// `StreamError::EndOfData` (converted into `E`) once the sequence has
    /// ended, on every call. A poisoned sequence fails with
    /// `StreamError::Poisoned` carrying the original cause.
    pub fn next_item(&mut self) -> Result<T, E> {
        self.fetch()?;
        self.take_cached().ok_or_else(|| E::from(StreamError::EndOfData))
    }

    /// Whether the step reported the end.
    #[inline]
    pub fn is_ended(&self) -> bool {
        matches!(self.state, SeqState::Ended)
    }

    /// Whether a failed or interrupted fetch made the sequence unusable.
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        matches!(self.state, SeqState::Poisoned(_) | SeqState::Fetching)
    }
}

impl<T, F, E> Iterator for LazySeq<T, F, E>
where
    F: FnMut() -> Result<Step<T>, E>,
    E: From<StreamError> + fmt::Display,
{
    type Item = Result<T, E>;

    /// Yields the poisoning error once, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.state, SeqState::Poisoned(_)) {
            return None;
        }
        match self.has_next() {
            Ok(true) => self.take_cached().map(Ok),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<T, F, E> FusedIterator for LazySeq<T, F, E>
where
    F: FnMut() -> Result<Step<T>, E>,
    E: From<StreamError> + fmt::Display,
{
}

impl<T, F, E> fmt::Debug for LazySeq<T, F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            SeqState::AwaitingFetch => "AwaitingFetch",
            SeqState::Fetching => "Fetching",
            SeqState::Cached(_) => "Cached",
            SeqState::Ended => "Ended",
            SeqState::Poisoned(_) => "Poisoned",
        };
        f.debug_struct("LazySeq").field("state", &state).finish()
    }
}

/// Build a lazy sequence from a step closure.
pub fn lazy_seq<T, F>(step: F) -> LazySeq<T, F>
where
    F: FnMut() -> StreamResult<Step<T>>,
{
    LazySeq::new(step)
}

/// Bridge any iterator into a lazy sequence.
///
/// ```rust
/// use pullcsv_core::lazy_from_iter;
///
/// let mut seq = lazy_from_iter(vec!["a", "b"]);
/// assert!(seq.has_next().unwrap());
/// assert_eq!(seq.next_item().unwrap(), "a");
/// assert_eq!(seq.next_item().unwrap(), "b");
/// assert!(seq.next_item().unwrap_err().is_end_of_data());
/// ```
pub fn lazy_from_iter<I>(
    iter: I,
) -> LazySeq<I::Item, impl FnMut() -> StreamResult<Step<I::Item>>>
where
    I: IntoIterator,
{
    let mut iter = iter.into_iter();
    LazySeq::new(move || Ok(iter.next().into()))
}
