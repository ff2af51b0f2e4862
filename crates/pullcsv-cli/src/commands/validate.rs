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

//! Validate command - strict well-formedness check

use super::collect_stats;
use crate::cli::InputArgs;
use crate::error::CliError;
use colored::Colorize;

/// Check that the input parses cleanly in strict mode.
///
/// Prints `✓` with row and field counts on success, `✗` followed by the
/// first error otherwise.
///
/// # Errors
///
/// Returns `Err` with the first read or parse error.
pub fn validate(input: &InputArgs) -> Result<(), CliError> {
    let label = input
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| super::STDIN_LABEL.to_string());

    match collect_stats(input, true) {
        Ok(stats) => {
            println!("{} {}", "✓".green().bold(), label);
            println!("  Rows: {}", stats.rows);
            println!("  Fields per row: {}..={}", stats.min_fields, stats.max_fields);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), label);
            Err(e)
        }
    }
}
