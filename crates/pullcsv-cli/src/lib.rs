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

//! Command-line interface for the pullcsv streaming CSV parser.
//!
//! # Commands
//!
//! - **parse**: print rows as text (` | `-joined), JSON arrays, or normalized CSV
//! - **stats**: row and field counts
//! - **validate**: strict well-formedness check reporting the first error
//!
//! Every command reads a file, or stdin when no file is given, and accepts
//! `--separator`, `--escape` and `--max-field-len`.
//!
//! # Examples
//!
//! ```no_run
//! use pullcsv_cli::cli::{InputArgs, OutputFormat};
//! use pullcsv_cli::commands::parse;
//!
//! # fn main() -> Result<(), pullcsv_cli::error::CliError> {
//! let input = InputArgs {
//!     file: Some("data.csv".into()),
//!     separator: ';',
//!     escape: '"',
//!     max_field_len: None,
//! };
//! parse(&input, false, OutputFormat::Json)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;

pub use error::CliError;
