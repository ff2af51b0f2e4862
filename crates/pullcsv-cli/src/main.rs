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

//! pullcsv command line interface

use clap::Parser;
use pullcsv_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// pullcsv - streaming CSV parser
///
/// Parses CSV-dialect text one row at a time, from a file or stdin.
///
/// # Examples
///
/// ```bash
/// # Print rows of a semicolon-separated file
/// pullcsv parse data.csv --separator ';'
///
/// # Emit one JSON array per row
/// cat data.csv | pullcsv parse --format json
///
/// # Strictly validate a file
/// pullcsv validate data.csv
/// ```
#[derive(Parser)]
#[command(name = "pullcsv")]
#[command(author, version, about = "pullcsv - streaming CSV parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    // Logging goes to stderr; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
