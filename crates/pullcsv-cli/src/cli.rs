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

//! CLI command definitions and argument parsing.

use crate::commands;
use crate::error::CliError;
use clap::{Args, Subcommand, ValueEnum};
use pullcsv::{CsvParser, CsvParserConfig, Dialect, DEFAULT_ESCAPE, DEFAULT_SEPARATOR};
use std::path::PathBuf;

/// Output format for `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fields joined by ` | `, one row per line
    Text,
    /// One JSON array of strings per line
    Json,
    /// CSV in the default dialect
    Csv,
}

/// Input and dialect arguments shared by every command.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Input file path (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Field separator character (`\t` or `tab` for tab)
    #[arg(short, long, default_value_t = DEFAULT_SEPARATOR, value_parser = parse_dialect_char)]
    pub separator: char,

    /// Escape (quote) character
    #[arg(short, long, default_value_t = DEFAULT_ESCAPE, value_parser = parse_dialect_char)]
    pub escape: char,

    /// Maximum field length in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_field_len: Option<usize>,
}

impl InputArgs {
    /// Build a parser from these arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidDialect` if separator and escape do not form
    /// a legal dialect.
    pub fn parser(&self, strict: bool) -> Result<CsvParser, CliError> {
        let dialect =
            Dialect::new(self.separator, self.escape).map_err(CliError::invalid_dialect)?;
        Ok(CsvParser::with_config(CsvParserConfig {
            dialect,
            strict,
            max_field_len: self.max_field_len,
            ..Default::default()
        }))
    }
}

/// Accept a single character, or a name for a character that is awkward to
/// type on a command line.
fn parse_dialect_char(arg: &str) -> Result<char, String> {
    match arg {
        "\\t" | "tab" => return Ok('\t'),
        "space" => return Ok(' '),
        _ => {}
    }
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected a single character, got '{}'", arg)),
    }
}

/// Top-level CLI commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse CSV and print its rows
    ///
    /// Rows are printed as they are parsed, so arbitrarily large inputs run
    /// in constant memory.
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Report malformed quoting as an error
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show row and field counts
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Report malformed quoting as an error
        #[arg(long)]
        strict: bool,
    },

    /// Check that the input is well-formed CSV
    ///
    /// Parses in strict mode and reports the first error.
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the input cannot be read, the dialect is invalid, the
    /// input fails to parse, or output cannot be written.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Parse {
                input,
                strict,
                format,
            } => commands::parse(&input, strict, format),
            Commands::Stats { input, strict } => commands::stats(&input, strict),
            Commands::Validate { input } => commands::validate(&input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dialect_char() {
        assert_eq!(parse_dialect_char(";"), Ok(';'));
        assert_eq!(parse_dialect_char("tab"), Ok('\t'));
        assert_eq!(parse_dialect_char("\\t"), Ok('\t'));
        assert_eq!(parse_dialect_char("\t"), Ok('\t'));
        assert_eq!(parse_dialect_char("é"), Ok('é'));
        assert!(parse_dialect_char("").is_err());
        assert!(parse_dialect_char(";;").is_err());
    }

    #[test]
    fn test_input_args_parser() {
        let args = InputArgs {
            file: None,
            separator: ';',
            escape: '\'',
            max_field_len: Some(8),
        };
        let parser = args.parser(true).unwrap();
        assert_eq!(parser.dialect().separator(), ';');
        assert!(parser.config().strict);
        assert_eq!(parser.config().max_field_len, Some(8));
    }

    #[test]
    fn test_input_args_invalid_dialect() {
        let args = InputArgs {
            file: None,
            separator: '"',
            escape: '"',
            max_field_len: None,
        };
        assert!(matches!(args.parser(false), Err(CliError::InvalidDialect(_))));
    }
}
