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

//! Parse command - print rows as text, JSON, or normalized CSV

use super::{for_each_row, stdout_error};
use crate::cli::{InputArgs, OutputFormat};
use crate::error::CliError;
use pullcsv::{CsvWriter, Row};
use std::io::{self, BufWriter, Write};

/// Separator between fields in text output.
pub const TEXT_FIELD_SEPARATOR: &str = " | ";

/// Parse the input and print each row to stdout.
///
/// # Errors
///
/// Returns `Err` if the input cannot be read or parsed, or stdout cannot be
/// written.
pub fn parse(input: &InputArgs, strict: bool, format: OutputFormat) -> Result<(), CliError> {
    let stdout = io::stdout();
    parse_to(input, strict, format, BufWriter::new(stdout.lock()))
}

/// Parse the input and write each row to `out`.
pub fn parse_to<W: Write>(
    input: &InputArgs,
    strict: bool,
    format: OutputFormat,
    mut out: W,
) -> Result<(), CliError> {
    let parser = input.parser(strict)?;

    match format {
        OutputFormat::Text => {
            for_each_row(input, parser, |_, row| {
                writeln!(out, "{}", render_text(&row)).map_err(stdout_error)
            })?;
        }
        OutputFormat::Json => {
            for_each_row(input, parser, |_, row| {
                let line = serde_json::to_string(&row).map_err(CliError::json_error)?;
                writeln!(out, "{}", line).map_err(stdout_error)
            })?;
        }
        OutputFormat::Csv => {
            let mut writer = CsvWriter::new(&mut out);
            for_each_row(input, parser, |_, row| {
                writer.write_row(row.iter()).map_err(csv_write_error)
            })?;
            writer.flush().map_err(csv_write_error)?;
        }
    }

    out.flush().map_err(stdout_error)
}

/// Render a row as its fields joined by [`TEXT_FIELD_SEPARATOR`].
pub fn render_text(row: &Row) -> String {
    row.as_slice().join(TEXT_FIELD_SEPARATOR)
}

fn csv_write_error(err: pullcsv::CsvError) -> CliError {
    CliError::Io {
        path: super::STDOUT_LABEL.into(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn input_file(content: &str) -> (NamedTempFile, InputArgs) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let args = InputArgs {
            file: Some(file.path().to_path_buf()),
            separator: ',',
            escape: '"',
            max_field_len: None,
        };
        (file, args)
    }

    fn run(content: &str, format: OutputFormat) -> String {
        let (_file, args) = input_file(content);
        let mut out = Vec::new();
        parse_to(&args, false, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_text() {
        let row = Row::new(vec!["a".into(), "".into(), "b c".into()]);
        assert_eq!(render_text(&row), "a |  | b c");
    }

    #[test]
    fn test_text_output() {
        assert_eq!(run("a,b\n\"c,d\",e\n", OutputFormat::Text), "a | b\nc,d | e\n");
    }

    #[test]
    fn test_json_output() {
        assert_eq!(
            run("a,\"say \"\"hi\"\"\"\n", OutputFormat::Json),
            "[\"a\",\"say \\\"hi\\\"\"]\n"
        );
    }

    #[test]
    fn test_csv_output_normalizes() {
        assert_eq!(run("  \"a\"  ,b\r\nc\n", OutputFormat::Csv), "a,b\nc\n");
    }

    #[test]
    fn test_parse_error_names_row() {
        let (_file, args) = input_file("a\n\"b\"x\n");
        let err = parse_to(&args, true, OutputFormat::Text, Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Parse { row: 2, .. }));
    }

    #[test]
    fn test_missing_file() {
        let args = InputArgs {
            file: Some("/definitely/not/here.csv".into()),
            separator: ',',
            escape: '"',
            max_field_len: None,
        };
        let err = parse_to(&args, false, OutputFormat::Text, Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
