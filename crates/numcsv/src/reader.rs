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

//! Heading and record reader.
//!
//! The reader consumes its input strictly line by line. The heading search
//! skips blank and comment lines; data lines are never skipped, so a blank
//! line between records is reported as a field count error.
//!
//! # Lifecycle
//!
//! ```text
//! Fresh ──read_heading──▶ HeadingRead ──read_record──▶ Reading ──EOF──▶ Exhausted
//!   └──────────────── read_record (skip_heading) ────────▲
//! ```

use crate::config::ReaderConfig;
use crate::error::{CsvError, CsvResult};
use crate::line::LineReader;
use crate::matrix::to_matrix;
use ndarray::Array2;
use std::fmt;
use std::io::Read;
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Position of a reader in its single pass over the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Nothing has been read yet.
    Fresh,
    /// The heading has been read; no records yet.
    HeadingRead,
    /// At least one data line has been consumed.
    Reading,
    /// The end of input has been reported.
    Exhausted,
}

impl fmt::Display for ReaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fresh => "fresh",
            Self::HeadingRead => "positioned after the heading",
            Self::Reading => "reading records",
            Self::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// Tolerant reader for numeric delimited text.
///
/// Reads an optional heading row as strings and every following line as a
/// record of `f64` values. All records of a pass share one field count, taken
/// from the configuration, the heading, or the first data line, in that order.
///
/// # Tolerances
///
/// - Blank lines and comment lines before the heading are skipped
/// - A trailing delimiter on the heading is accepted when configured
/// - A single trailing delimiter on a data line is always accepted
/// - One pair of surrounding double quotes is removed from heading fields
///
/// Numbers themselves are never repaired: a field that does not parse as
/// `f64` fails the whole line.
///
/// # Examples
///
/// ## Heading and Records
///
/// ```rust
/// use numcsv::{NumCsvReader, ReaderConfig};
/// use std::io::Cursor;
///
/// let input = "# exported by logger v2\n\n\"time\",\"volts\"\n0.0,1.5\n0.5,1.25,\n";
/// let config = ReaderConfig::default().with_comment("#");
/// let mut reader = NumCsvReader::with_config(Cursor::new(input), config).unwrap();
///
/// assert_eq!(reader.read_heading().unwrap(), vec!["time", "volts"]);
/// assert_eq!(reader.read_record().unwrap(), Some(vec![0.0, 1.5]));
/// assert_eq!(reader.read_record().unwrap(), Some(vec![0.5, 1.25]));
/// assert_eq!(reader.read_record().unwrap(), None);
/// ```
///
/// ## Whole Matrix
///
/// ```rust
/// use numcsv::{NumCsvReader, ReaderConfig};
/// use std::io::Cursor;
///
/// let config = ReaderConfig::default().without_heading();
/// let mut reader = NumCsvReader::with_config(Cursor::new("1,2,3\n4,5,6\n"), config).unwrap();
///
/// let matrix = reader.read_all().unwrap();
/// assert_eq!(matrix.dim(), (2, 3));
/// assert_eq!(matrix[[1, 2]], 6.0);
/// ```
///
/// ## Iterating Records
///
/// ```rust
/// use numcsv::{NumCsvReader, ReaderConfig};
/// use std::io::Cursor;
///
/// let config = ReaderConfig::default().with_delimiter(";");
/// let mut reader = NumCsvReader::with_config(Cursor::new("a;b\n1;2\n3;4\n"), config).unwrap();
/// reader.read_heading().unwrap();
///
/// let sums: Vec<f64> = reader
///     .map(|record| record.map(|values| values.iter().sum::<f64>()))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(sums, vec![3.0, 7.0]);
/// ```
pub struct NumCsvReader<R: Read> {
    lines: LineReader<R>,
    config: ReaderConfig,
    fields_per_record: usize,
    heading_consumed: bool,
    trailing_delimiter_seen: bool,
    state: ReaderState,
}

impl<R: Read> NumCsvReader<R> {
    /// Create a reader with the default configuration.
    ///
    /// Comma delimited, heading expected, no comments, field count inferred.
    pub fn new(reader: R) -> Self {
        Self::build(reader, ReaderConfig::default())
    }

    /// Create a reader with a custom configuration.
    ///
    /// # Errors
    ///
    /// - `CsvError::InvalidConfig`: empty delimiter or zero buffer size
    pub fn with_config(reader: R, config: ReaderConfig) -> CsvResult<Self> {
        config.validate()?;
        Ok(Self::build(reader, config))
    }

    fn build(reader: R, config: ReaderConfig) -> Self {
        Self {
            lines: LineReader::with_capacity(reader, config.buffer_size, config.max_line_length),
            fields_per_record: config.fields_per_record,
            config,
            heading_consumed: false,
            trailing_delimiter_seen: false,
            state: ReaderState::Fresh,
        }
    }

    /// Read the heading row.
    ///
    /// Skips blank lines and, when a comment prefix is configured, comment
    /// lines. The first remaining line is split on the heading delimiter and
    /// fixes the field count for the rest of the pass.
    ///
    /// # Errors
    ///
    /// - `CsvError::Sequence`: called twice, after a record, or with
    ///   `skip_heading` set
    /// - `CsvError::NoHeading`: input ended during the search
    /// - `CsvError::Io` / `CsvError::LineTooLong`: the source failed
    /// - `CsvError::TrailingDelimiter`: heading ends with a delimiter and
    ///   `allow_trailing_delimiter` is false
    /// - `CsvError::FieldCount`: heading width differs from a configured
    ///   `fields_per_record`
    pub fn read_heading(&mut self) -> CsvResult<Vec<String>> {
        if self.config.skip_heading {
            return Err(CsvError::sequence(
                "read a heading with skip_heading set",
                self.state,
            ));
        }
        if self.state != ReaderState::Fresh {
            return Err(CsvError::sequence("read a heading", self.state));
        }

        let (line_number, line) = self.next_heading_line()?;

        let mut fields: Vec<&str> = line
            .split(self.config.effective_heading_delimiter())
            .collect();
        if fields.last() == Some(&"") {
            if !self.config.allow_trailing_delimiter {
                return Err(CsvError::TrailingDelimiter { line: line_number });
            }
            fields.pop();
            self.trailing_delimiter_seen = true;
        }

        if self.fields_per_record != 0 && fields.len() != self.fields_per_record {
            return Err(CsvError::field_count(
                line_number,
                self.fields_per_record,
                fields.len(),
            ));
        }
        self.fields_per_record = fields.len();

        let heading: Vec<String> = fields.into_iter().map(strip_quotes).collect();

        self.heading_consumed = true;
        self.state = ReaderState::HeadingRead;
        debug!(
            line = line_number,
            columns = heading.len(),
            trailing_delimiter = self.trailing_delimiter_seen,
            "read heading"
        );
        Ok(heading)
    }

    /// Read the next data record, or `None` once the input is exhausted.
    ///
    /// Exactly one line is consumed per call. A single trailing delimiter is
    /// dropped. On the first line of a headingless pass with no configured
    /// field count, the line's width becomes the field count.
    ///
    /// # Errors
    ///
    /// - `CsvError::Sequence`: a heading is expected but has not been read
    /// - `CsvError::Io` / `CsvError::LineTooLong`: the source failed
    /// - `CsvError::FieldCount`: the line has the wrong number of fields
    /// - `CsvError::NumericParse`: a field is not a valid `f64`
    pub fn read_record(&mut self) -> CsvResult<Option<Vec<f64>>> {
        match self.state {
            ReaderState::Exhausted => return Ok(None),
            ReaderState::Fresh if !self.config.skip_heading => {
                return Err(CsvError::sequence("read a record before the heading", self.state));
            }
            _ => {}
        }

        let (line_number, line) = match self.lines.next_line()? {
            Some(next) => next,
            None => {
                debug!(lines = self.lines.line_number(), "end of input");
                self.state = ReaderState::Exhausted;
                return Ok(None);
            }
        };
        self.state = ReaderState::Reading;

        let mut fields: Vec<&str> = line.split(self.config.delimiter.as_str()).collect();
        if fields.last() == Some(&"") {
            fields.pop();
        }

        if !self.heading_consumed {
            self.heading_consumed = true;
            if self.fields_per_record == 0 {
                self.fields_per_record = fields.len();
                debug!(
                    line = line_number,
                    columns = self.fields_per_record,
                    "inferred field count from first record"
                );
            }
        }

        if fields.len() != self.fields_per_record {
            return Err(CsvError::field_count(
                line_number,
                self.fields_per_record,
                fields.len(),
            ));
        }

        let record = fields
            .iter()
            .enumerate()
            .map(|(column, field)| {
                field
                    .parse::<f64>()
                    .map_err(|_| CsvError::numeric_parse(line_number, column, *field))
            })
            .collect::<CsvResult<Vec<f64>>>()?;

        trace!(line = line_number, "read record");
        Ok(Some(record))
    }

    /// Read every remaining record into a `rows × fields_per_record` matrix.
    ///
    /// Any error aborts the read; no partial matrix is returned.
    pub fn read_all(&mut self) -> CsvResult<Array2<f64>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record()? {
            records.push(record);
        }

        let matrix = to_matrix(records, self.fields_per_record)?;
        debug!(
            rows = matrix.nrows(),
            columns = matrix.ncols(),
            "assembled matrix"
        );
        Ok(matrix)
    }

    /// The fixed field count, or `0` while it is still to be inferred.
    #[inline]
    pub fn fields_per_record(&self) -> usize {
        self.fields_per_record
    }

    /// Whether the heading ended with an accepted trailing delimiter.
    #[inline]
    pub fn has_trailing_delimiter(&self) -> bool {
        self.trailing_delimiter_seen
    }

    /// Number of the last line consumed from the input.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.lines.line_number()
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// The configuration this reader was built with.
    #[inline]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    fn next_heading_line(&mut self) -> CsvResult<(usize, String)> {
        while let Some((line_number, line)) = self.lines.next_line()? {
            if line.is_empty() {
                trace!(line = line_number, "skipping blank line");
                continue;
            }
            if let Some(prefix) = self.config.comment_prefix() {
                if line.starts_with(prefix) {
                    trace!(line = line_number, "skipping comment line");
                    continue;
                }
            }
            return Ok((line_number, line));
        }
        Err(CsvError::NoHeading)
    }
}

/// Remove at most one leading and one trailing double quote.
fn strip_quotes(field: &str) -> String {
    let field = field.strip_suffix('"').unwrap_or(field);
    let field = field.strip_prefix('"').unwrap_or(field);
    field.to_string()
}

impl<R: Read> Iterator for NumCsvReader<R> {
    type Item = CsvResult<Vec<f64>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            // Nothing was consumed, so the caller can still read the heading
            Err(e @ CsvError::Sequence { .. }) => Some(Err(e)),
            Err(e) => {
                // The line cursor cannot be rewound
                self.state = ReaderState::Exhausted;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for NumCsvReader<R> {}
