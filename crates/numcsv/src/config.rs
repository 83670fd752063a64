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

//! Reader configuration.

use crate::error::{CsvError, CsvResult};

/// Configuration options for [`NumCsvReader`](crate::NumCsvReader).
///
/// The configuration is fixed once the reader is built.
///
/// # Examples
///
/// ## Default Configuration
///
/// ```rust
/// use numcsv::ReaderConfig;
///
/// let config = ReaderConfig::default();
/// assert_eq!(config.delimiter, ",");
/// assert_eq!(config.heading_delimiter, None);
/// assert!(!config.allow_trailing_delimiter);
/// assert_eq!(config.comment, None);
/// assert_eq!(config.fields_per_record, 0);
/// assert!(!config.skip_heading);
/// ```
///
/// ## Semicolon Data With Commented Preamble
///
/// ```rust
/// use numcsv::ReaderConfig;
///
/// let config = ReaderConfig {
///     delimiter: ";".to_string(),
///     comment: Some("#".to_string()),
///     allow_trailing_delimiter: true,
///     ..Default::default()
/// };
/// assert_eq!(config.effective_heading_delimiter(), ";");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderConfig {
    /// Field delimiter for data lines.
    ///
    /// Default: `","`
    pub delimiter: String,

    /// Delimiter for the heading line.
    ///
    /// `None` (or an empty string) uses [`delimiter`](Self::delimiter).
    ///
    /// Default: None
    pub heading_delimiter: Option<String>,

    /// Accept a single delimiter at the end of the heading line.
    ///
    /// Data lines always tolerate one trailing delimiter; this flag only
    /// governs the heading.
    ///
    /// Default: false
    pub allow_trailing_delimiter: bool,

    /// Prefix marking comment lines.
    ///
    /// Comment lines (and blank lines) are skipped only while searching for
    /// the heading. `None` or an empty string disables comment handling.
    ///
    /// Default: None
    pub comment: Option<String>,

    /// Expected number of fields per line.
    ///
    /// `0` infers the count from the first parsed line (heading or data).
    ///
    /// Default: 0
    pub fields_per_record: usize,

    /// The input has no heading line; every line is data.
    ///
    /// Default: false
    pub skip_heading: bool,

    /// Buffer size for reading input.
    ///
    /// Default: 64KB
    pub buffer_size: usize,

    /// Maximum line length in bytes, excluding the line terminator.
    ///
    /// `0` disables the check.
    ///
    /// Default: 1,000,000 bytes (1MB)
    pub max_line_length: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            heading_delimiter: None,
            allow_trailing_delimiter: false,
            comment: None,
            fields_per_record: 0,
            skip_heading: false,
            buffer_size: 64 * 1024,
            max_line_length: 1_000_000,
        }
    }
}

impl ReaderConfig {
    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set a separate heading delimiter.
    pub fn with_heading_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.heading_delimiter = Some(delimiter.into());
        self
    }

    /// Set the comment prefix.
    pub fn with_comment(mut self, prefix: impl Into<String>) -> Self {
        self.comment = Some(prefix.into());
        self
    }

    /// Fix the expected number of fields up front.
    pub fn with_fields_per_record(mut self, count: usize) -> Self {
        self.fields_per_record = count;
        self
    }

    /// Accept a trailing delimiter on the heading line.
    pub fn allowing_trailing_delimiter(mut self) -> Self {
        self.allow_trailing_delimiter = true;
        self
    }

    /// Treat every line as data.
    pub fn without_heading(mut self) -> Self {
        self.skip_heading = true;
        self
    }

    /// The delimiter actually used to split the heading line.
    #[inline]
    pub fn effective_heading_delimiter(&self) -> &str {
        match self.heading_delimiter.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => &self.delimiter,
        }
    }

    /// The comment prefix, if comment skipping is enabled.
    #[inline]
    pub fn comment_prefix(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }

    /// Check the configuration before a reader is built.
    pub fn validate(&self) -> CsvResult<()> {
        if self.delimiter.is_empty() {
            return Err(CsvError::InvalidConfig(
                "delimiter must not be empty".to_string(),
            ));
        }
        if self.buffer_size == 0 {
            return Err(CsvError::InvalidConfig(
                "buffer_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
