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

//! Error types for the numeric CSV reader.
//!
//! Every failure aborts the current read and is surfaced to the caller. Errors
//! that relate to a specific line carry its 1-based line number.
//!
//! # Error Categories
//!
//! - **Input Errors**: the source failed, ended before a heading, or produced
//!   an over-long line
//! - **Format Errors**: trailing delimiter on the heading, wrong field count,
//!   unparsable number
//! - **Usage Errors**: calls made out of order, invalid configuration
//!
//! # Examples
//!
//! ```rust
//! use numcsv::{CsvError, NumCsvReader, ReaderConfig};
//! use std::io::Cursor;
//!
//! let config = ReaderConfig {
//!     skip_heading: true,
//!     ..Default::default()
//! };
//! let mut reader = NumCsvReader::with_config(Cursor::new("1,2\n3,x\n"), config).unwrap();
//!
//! reader.read_record().unwrap();
//! match reader.read_record() {
//!     Err(CsvError::NumericParse { line, value, .. }) => {
//!         assert_eq!(line, 2);
//!         assert_eq!(value, "x");
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use crate::reader::ReaderState;
use thiserror::Error;

/// Errors that can occur while reading numeric CSV input.
///
/// Use [`line()`](Self::line) to extract the line number uniformly and
/// [`is_input()`](Self::is_input) to tell source failures from format errors.
///
/// # Examples
///
/// ```rust
/// use numcsv::CsvError;
///
/// let err = CsvError::field_count(7, 3, 4);
/// assert_eq!(err.line(), Some(7));
/// assert_eq!(
///     err.to_string(),
///     "Wrong number of fields at line 7: expected 3, got 4"
/// );
/// ```
#[derive(Error, Debug)]
pub enum CsvError {
    /// The underlying source failed, including invalid UTF-8.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended before a heading line was found.
    #[error("Input ended before a heading line was found")]
    NoHeading,

    /// A line exceeded the configured maximum length.
    #[error("Line {line} exceeds the limit of {limit} bytes ({length} bytes read)")]
    LineTooLong {
        line: usize,
        /// Bytes read before giving up, at most `limit + 2`.
        length: usize,
        limit: usize,
    },

    /// The heading ends with a delimiter and trailing delimiters are not allowed.
    #[error("Extra delimiter at end of heading line {line}")]
    TrailingDelimiter { line: usize },

    /// A line's field count disagrees with the fixed field count.
    #[error("Wrong number of fields at line {line}: expected {expected}, got {actual}")]
    FieldCount {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A data field is not a valid floating point literal.
    #[error("Invalid number '{value}' at line {line}, column {column}")]
    NumericParse {
        line: usize,
        /// 0-based column index.
        column: usize,
        value: String,
    },

    /// An operation was called in a state that does not allow it.
    #[error("Cannot {operation} while reader is {state}")]
    Sequence {
        operation: &'static str,
        state: ReaderState,
    },

    /// The configuration was rejected at construction.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Records could not be assembled into a matrix.
    #[error("Matrix shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl CsvError {
    /// Create a field count error.
    #[inline]
    pub fn field_count(line: usize, expected: usize, actual: usize) -> Self {
        Self::FieldCount {
            line,
            expected,
            actual,
        }
    }

    /// Create a numeric parse error.
    #[inline]
    pub fn numeric_parse(line: usize, column: usize, value: impl Into<String>) -> Self {
        Self::NumericParse {
            line,
            column,
            value: value.into(),
        }
    }

    /// Create a sequence error.
    #[inline]
    pub fn sequence(operation: &'static str, state: ReaderState) -> Self {
        Self::Sequence { operation, state }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::LineTooLong { line, .. }
            | Self::TrailingDelimiter { line }
            | Self::FieldCount { line, .. }
            | Self::NumericParse { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Whether the error came from the input source rather than its content.
    #[inline]
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::NoHeading | Self::LineTooLong { .. }
        )
    }
}

/// Result type for reader operations.
pub type CsvResult<T> = Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    // ==================== Display tests ====================

    #[test]
    fn test_io_display() {
        let err = CsvError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("pipe closed"));
    }

    #[test]
    fn test_no_heading_display() {
        assert_eq!(
            CsvError::NoHeading.to_string(),
            "Input ended before a heading line was found"
        );
    }

    #[test]
    fn test_line_too_long_display() {
        let err = CsvError::LineTooLong {
            line: 3,
            length: 2048,
            limit: 1024,
        };
        let display = err.to_string();
        assert!(display.contains("Line 3"));
        assert!(display.contains("2048"));
        assert!(display.contains("1024"));
    }

    #[test]
    fn test_trailing_delimiter_display() {
        let err = CsvError::TrailingDelimiter { line: 1 };
        assert_eq!(err.to_string(), "Extra delimiter at end of heading line 1");
    }

    #[test]
    fn test_numeric_parse_display() {
        let err = CsvError::numeric_parse(4, 1, "abc");
        assert_eq!(err.to_string(), "Invalid number 'abc' at line 4, column 1");
    }

    #[test]
    fn test_sequence_display() {
        let err = CsvError::sequence("read a heading", ReaderState::Reading);
        assert_eq!(
            err.to_string(),
            "Cannot read a heading while reader is reading records"
        );
    }

    #[test]
    fn test_shape_display() {
        let err = CsvError::from(ndarray::ShapeError::from_kind(
            ndarray::ErrorKind::IncompatibleShape,
        ));
        assert!(err.to_string().starts_with("Matrix shape error"));
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_invalid_config_display() {
        let err = CsvError::InvalidConfig("delimiter must not be empty".to_string());
        assert!(err.to_string().contains("delimiter must not be empty"));
    }

    // ==================== line() tests ====================

    #[test]
    fn test_line_present() {
        assert_eq!(CsvError::TrailingDelimiter { line: 2 }.line(), Some(2));
        assert_eq!(CsvError::field_count(5, 1, 2).line(), Some(5));
        assert_eq!(CsvError::numeric_parse(9, 0, "").line(), Some(9));
        let too_long = CsvError::LineTooLong {
            line: 11,
            length: 10,
            limit: 5,
        };
        assert_eq!(too_long.line(), Some(11));
    }

    #[test]
    fn test_line_absent() {
        assert_eq!(CsvError::NoHeading.line(), None);
        assert_eq!(
            CsvError::from(io::Error::new(io::ErrorKind::Other, "x")).line(),
            None
        );
        assert_eq!(
            CsvError::sequence("read a record", ReaderState::Fresh).line(),
            None
        );
    }

    // ==================== is_input() tests ====================

    #[test]
    fn test_is_input() {
        assert!(CsvError::NoHeading.is_input());
        assert!(CsvError::from(io::Error::new(io::ErrorKind::InvalidData, "utf8")).is_input());
        assert!(!CsvError::field_count(1, 2, 3).is_input());
        assert!(!CsvError::numeric_parse(1, 0, "x").is_input());
        assert!(!CsvError::TrailingDelimiter { line: 1 }.is_input());
    }

    #[test]
    fn test_from_io_error() {
        let err: CsvError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, CsvError::Io(_)));
    }
}
