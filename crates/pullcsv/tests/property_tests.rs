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

//! Property-based tests for parsing, writing, and dialects.

use proptest::prelude::*;
use pullcsv::{
    parse_str, to_csv_string, validate_dialect, CsvParser, CsvWriterConfig, Dialect,
    PeekableStream, Row, StrSource,
};

fn field() -> impl Strategy<Value = String> {
    "[a-z ,;'\"\r\n\té]{0,8}"
}

fn row() -> impl Strategy<Value = Row> {
    prop::collection::vec(field(), 1..5).prop_map(Row::new)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: rows written with the default writer parse back unchanged.
    #[test]
    fn prop_write_then_parse(rows in prop::collection::vec(row(), 0..8)) {
        let text = to_csv_string(&rows, CsvWriterConfig::default()).unwrap();
        let parsed: Vec<Row> = parse_str(&text).collect::<Result<_, _>>().unwrap();
        prop_assert_eq!(parsed, rows);
    }

    /// Property: the same holds for CRLF terminators and a custom dialect.
    #[test]
    fn prop_write_then_parse_custom_dialect(rows in prop::collection::vec(row(), 0..8)) {
        let dialect = Dialect::new(';', '\'').unwrap();
        let config = CsvWriterConfig {
            dialect,
            crlf: true,
            ..Default::default()
        };
        let text = to_csv_string(&rows, config).unwrap();
        let parsed: Vec<Row> = CsvParser::new(dialect)
            .rows_from_str(&text)
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(parsed, rows);
    }

    /// Property: the round trip also holds when the escape is a space or a tab.
    #[test]
    fn prop_write_then_parse_whitespace_escape(
        rows in prop::collection::vec(row(), 0..8),
        (separator, escape) in prop::sample::select(vec![(',', ' '), (';', '\t'), ('|', ' ')]),
    ) {
        let dialect = Dialect::new(separator, escape).unwrap();
        let config = CsvWriterConfig {
            dialect,
            ..Default::default()
        };
        let text = to_csv_string(&rows, config).unwrap();
        let parsed: Vec<Row> = CsvParser::new(dialect)
            .rows_from_str(&text)
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(parsed, rows);
    }

    /// Property: a dialect is legal iff its characters differ and neither is a line break.
    #[test]
    fn prop_dialect_validation(separator in any::<char>(), escape in any::<char>()) {
        let expected = separator != escape
            && !matches!(separator, '\r' | '\n')
            && !matches!(escape, '\r' | '\n');
        prop_assert_eq!(validate_dialect(separator, escape).is_ok(), expected);
        prop_assert_eq!(Dialect::new(separator, escape).is_ok(), expected);
    }

    /// Property: a plain value is returned verbatim and the boundary is left unread.
    #[test]
    fn prop_plain_value_verbatim(
        value in "[a-zA-Z0-9 \t.;:é]{0,16}",
        boundary in prop::sample::select(vec![",", "\n", "\r", "\r\n", ""]),
    ) {
        let input = format!("{}{}", value, boundary);
        let mut stream = PeekableStream::new(StrSource::new(&input));
        let parsed = CsvParser::default().parse_value(&mut stream).unwrap();
        prop_assert_eq!(&parsed, &value);
        let rest: String = stream.map(|c| c.unwrap()).collect();
        prop_assert_eq!(rest, boundary);
    }

    /// Property: lenient parsing never fails on well-formed UTF-8 text.
    #[test]
    fn prop_lenient_never_fails(input in "[a-c,\"\r\n \t]{0,64}") {
        for row in parse_str(&input) {
            prop_assert!(row.is_ok());
        }
    }

    /// Property: every row has at least one field.
    #[test]
    fn prop_rows_never_empty(input in "[a-c,\"\r\n]{0,64}") {
        for row in parse_str(&input) {
            prop_assert!(!row.unwrap().is_empty());
        }
    }
}
