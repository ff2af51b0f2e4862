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

//! Parsed rows.

use std::ops::Index;

/// One parsed row: its fields in input order.
///
/// Fields are plain strings; no type coercion and no header handling is
/// applied. A row owns its data and does not refer back to the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    /// Create a row from its fields.
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Iterate over the fields.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(String::as_str)
    }

    /// Borrow all fields.
    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }

    /// Take the fields.
    pub fn into_inner(self) -> Vec<String> {
        self.fields
    }
}

impl Index<usize> for Row {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.fields[index]
    }
}

impl From<Vec<String>> for Row {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<S: AsRef<str>> PartialEq<[S]> for Row {
    fn eq(&self, other: &[S]) -> bool {
        self.fields.len() == other.len()
            && self
                .fields
                .iter()
                .zip(other)
                .all(|(a, b)| a.as_str() == b.as_ref())
    }
}

impl<S: AsRef<str>, const N: usize> PartialEq<[S; N]> for Row {
    fn eq(&self, other: &[S; N]) -> bool {
        self == &other[..]
    }
}

impl<S: AsRef<str>, const N: usize> PartialEq<[S; N]> for &Row {
    fn eq(&self, other: &[S; N]) -> bool {
        **self == other[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Row {
        Row::new(fields.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_accessors() {
        let r = row(&["a", "", "c"]);
        assert_eq!(r.len(), 3);
        assert!(!r.is_empty());
        assert_eq!(r.get(1), Some(""));
        assert_eq!(r.get(3), None);
        assert_eq!(&r[2], "c");
        assert_eq!(r.iter().collect::<Vec<_>>(), vec!["a", "", "c"]);
    }

    #[test]
    fn test_compare_with_arrays() {
        let r = row(&["x", "y"]);
        assert_eq!(r, ["x", "y"]);
        assert_ne!(r, ["x"]);
        let borrowed: &Row = &r;
        assert_eq!(borrowed, ["x", "y"]);
        assert_ne!(borrowed, ["y", "x"]);
        assert_ne!(r, ["x", "z"]);
    }

    #[test]
    fn test_into_inner() {
        let r = Row::from(vec!["1".to_string()]);
        assert_eq!(r.as_slice(), &["1".to_string()]);
        assert_eq!(r.into_inner(), vec!["1".to_string()]);
    }

    #[test]
    fn test_empty_row() {
        let r = Row::default();
        assert!(r.is_empty());
        assert_eq!(r, [] as [&str; 0]);
    }
}
