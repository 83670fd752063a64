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

#![no_main]

use libfuzzer_sys::fuzz_target;
use numcsv::{NumCsvReader, ReaderConfig};
use std::io::Cursor;

/// Fuzz target for the numeric reader.
///
/// The first input byte selects the configuration; the rest is fed to the
/// reader as raw bytes, so invalid UTF-8 is exercised too.
///
/// ```bash
/// cd crates/numcsv
/// cargo fuzz run fuzz_reader -- -max_len=65536
/// ```
///
/// # Expected Behavior
///
/// - The reader never panics
/// - Every returned record has the reader's field count
/// - A successful matrix has that many columns
fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };

    let mut config = ReaderConfig {
        skip_heading: selector & 0b0001 != 0,
        allow_trailing_delimiter: selector & 0b0010 != 0,
        max_line_length: 4096,
        ..Default::default()
    };
    if selector & 0b0100 != 0 {
        config.comment = Some("#".to_string());
    }
    if selector & 0b1000 != 0 {
        config.delimiter = ";".to_string();
    }

    let Ok(mut reader) = NumCsvReader::with_config(Cursor::new(body), config) else {
        return;
    };

    if !reader.config().skip_heading {
        match reader.read_heading() {
            Ok(heading) => assert_eq!(heading.len(), reader.fields_per_record()),
            Err(_) => return,
        }
    }

    if selector & 0b1_0000 != 0 {
        if let Ok(matrix) = reader.read_all() {
            assert_eq!(matrix.ncols(), reader.fields_per_record());
        }
    } else {
        while let Some(record) = reader.next() {
            match record {
                Ok(values) => assert_eq!(values.len(), reader.fields_per_record()),
                Err(_) => break,
            }
        }
    }
});
