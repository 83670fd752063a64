// Dweve numcsv - Tolerant Numeric CSV Reader
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

//! Tolerant Numeric CSV Reader
//!
//! Reads loosely formatted, delimiter separated numeric text into `f64`
//! records or a dense [`ndarray::Array2`] matrix. It accepts the deviations
//! that instrument exports and spreadsheets tend to produce and strict CSV
//! parsers reject:
//!
//! - **Preamble**: blank lines and comment lines before the heading
//! - **Trailing Delimiters**: one extra delimiter at the end of a line
//! - **Quoted Headings**: `"time","volts"` reads as `time`, `volts`
//! - **Inferred Width**: the field count comes from the first line when not
//!   configured
//!
//! It does not handle quoted fields containing delimiters or newlines, and it
//! never writes CSV.
//!
//! # Usage
//!
//! ```rust,no_run
//! use numcsv::{NumCsvReader, ReaderConfig};
//! use std::fs::File;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("measurements.csv")?;
//! let config = ReaderConfig::default()
//!     .with_comment("#")
//!     .allowing_trailing_delimiter();
//!
//! let mut reader = NumCsvReader::with_config(file, config)?;
//! let heading = reader.read_heading()?;
//! let matrix = reader.read_all()?;
//!
//! println!("{:?}: {} rows", heading, matrix.nrows());
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The reader emits `tracing` events at `debug` and `trace` level. Install a
//! subscriber in the host application to see them.

mod config;
mod error;
mod line;
mod matrix;
mod reader;

pub use config::ReaderConfig;
pub use error::{CsvError, CsvResult};
pub use line::LineReader;
pub use reader::{NumCsvReader, ReaderState};

/// Re-export of the matrix crate used for [`NumCsvReader::read_all`].
pub use ndarray;
