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

//! Command implementations for the pullcsv CLI.

mod parse;
mod stats;
mod validate;

pub use parse::parse;
pub use stats::{collect_stats, stats, RowStats};
pub use validate::validate;

use crate::cli::InputArgs;
use crate::error::CliError;
use pullcsv::{CsvParser, Row};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::debug;

/// Label used in messages when reading standard input.
pub const STDIN_LABEL: &str = "<stdin>";

/// Label used in messages when writing standard output.
pub const STDOUT_LABEL: &str = "<stdout>";

/// Open the input named by `args`, or stdin when no file is given.
///
/// Returns the reader together with the label used in error messages.
///
/// # Errors
///
/// Returns `CliError::Io` if the file cannot be opened.
pub fn open_input(args: &InputArgs) -> Result<(Box<dyn Read>, PathBuf), CliError> {
    match &args.file {
        Some(path) => {
            let file = File::open(path).map_err(|e| CliError::io_error(path, e))?;
            debug!(path = %path.display(), "reading input file");
            Ok((Box::new(file), path.clone()))
        }
        None => {
            debug!("reading standard input");
            Ok((Box::new(io::stdin().lock()), PathBuf::from(STDIN_LABEL)))
        }
    }
}

/// Stream every row of the input through `f`, in order.
///
/// `f` receives the 1-based row number and the row. Parsing stops at the
/// first parse error or the first error returned by `f`.
///
/// # Errors
///
/// Returns `CliError::Parse` (or `CliError::Io` for read failures) naming the
/// failing row, or whatever `f` returns.
pub fn for_each_row<F>(args: &InputArgs, parser: CsvParser, mut f: F) -> Result<usize, CliError>
where
    F: FnMut(usize, Row) -> Result<(), CliError>,
{
    let (reader, label) = open_input(args)?;
    let mut rows = 0usize;
    for result in parser.rows_from_reader(reader) {
        let row = result.map_err(|e| CliError::parse_error(&label, rows + 1, e))?;
        rows += 1;
        f(rows, row)?;
    }
    debug!(rows, input = %label.display(), "finished reading input");
    Ok(rows)
}

/// Map an output write failure.
pub(crate) fn stdout_error(err: io::Error) -> CliError {
    CliError::io_error(STDOUT_LABEL, err)
}
