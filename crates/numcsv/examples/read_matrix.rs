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

//! Read a numeric CSV file and print per-column means.
//!
//! ```bash
//! RUST_LOG=numcsv=debug cargo run -p numcsv --example read_matrix -- data.csv
//! ```
//!
//! Without a path, a small built-in sample is read.

use numcsv::{NumCsvReader, ReaderConfig};
use std::fs::File;
use std::io::{Cursor, Read};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "\
# sample export
\"time\",\"temperature\",\"pressure\",
0,21.5,1013.2,
60,21.7,1013.0,
120,21.6,1012.8,
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let source: Box<dyn Read> = match std::env::args().nth(1) {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(Cursor::new(SAMPLE)),
    };

    let config = ReaderConfig::default()
        .with_comment("#")
        .allowing_trailing_delimiter();
    let mut reader = NumCsvReader::with_config(source, config)?;

    let heading = reader.read_heading()?;
    let matrix = reader.read_all()?;

    println!("{} rows x {} columns", matrix.nrows(), matrix.ncols());
    for (name, column) in heading.iter().zip(matrix.columns()) {
        match column.mean() {
            Some(mean) => println!("  {:<16} mean {:.4}", name, mean),
            None => println!("  {:<16} (no data)", name),
        }
    }

    Ok(())
}
