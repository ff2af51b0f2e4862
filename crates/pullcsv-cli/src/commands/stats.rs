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

//! Stats command - row and field counts

use super::{for_each_row, stdout_error};
use crate::cli::InputArgs;
use crate::error::CliError;
use pullcsv::Row;
use std::io::{self, Write};

/// Summary counts over all rows of an input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowStats {
    /// Number of rows
    pub rows: usize,
    /// Number of fields across all rows
    pub fields: usize,
    /// Fewest fields in a row (0 when there are no rows)
    pub min_fields: usize,
    /// Most fields in a row
    pub max_fields: usize,
    /// Longest field in bytes
    pub max_field_bytes: usize,
}

impl RowStats {
    /// Account for one more row.
    pub fn record(&mut self, row: &Row) {
        let n = row.len();
        self.min_fields = if self.rows == 0 {
            n
        } else {
            self.min_fields.min(n)
        };
        self.max_fields = self.max_fields.max(n);
        self.rows += 1;
        self.fields += n;
        if let Some(longest) = row.iter().map(str::len).max() {
            self.max_field_bytes = self.max_field_bytes.max(longest);
        }
    }

    /// Whether every row has the same number of fields.
    pub fn is_rectangular(&self) -> bool {
        self.min_fields == self.max_fields
    }
}

/// Compute [`RowStats`] for the input.
///
/// # Errors
///
/// Returns `Err` if the input cannot be read or parsed.
pub fn collect_stats(input: &InputArgs, strict: bool) -> Result<RowStats, CliError> {
    let parser = input.parser(strict)?;
    let mut stats = RowStats::default();
    for_each_row(input, parser, |_, row| {
        stats.record(&row);
        Ok(())
    })?;
    Ok(stats)
}

/// Print row and field counts for the input.
///
/// # Errors
///
/// Returns `Err` if the input cannot be read or parsed, or stdout cannot be
/// written.
pub fn stats(input: &InputArgs, strict: bool) -> Result<(), CliError> {
    let stats = collect_stats(input, strict)?;
    let mut out = io::stdout().lock();
    write_stats(&stats, &mut out).map_err(stdout_error)
}

fn write_stats<W: Write>(stats: &RowStats, out: &mut W) -> io::Result<()> {
    writeln!(out, "Rows:            {}", stats.rows)?;
    writeln!(out, "Fields:          {}", stats.fields)?;
    writeln!(out, "Min fields/row:  {}", stats.min_fields)?;
    writeln!(out, "Max fields/row:  {}", stats.max_fields)?;
    writeln!(out, "Longest field:   {} bytes", stats.max_field_bytes)?;
    if stats.rows > 0 && !stats.is_rectangular() {
        writeln!(out, "Note: rows have differing field counts")?;
    }
    Ok(())
}
