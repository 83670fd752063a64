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

//! Numbered line cursor over a byte source.
//!
//! Exposed for callers that want the same line handling (LF/CRLF stripping,
//! line numbers, length limit) without the numeric parsing on top.

use crate::error::{CsvError, CsvResult};
use std::io::{self, BufRead, BufReader, Read};

/// Buffered line reader with line number tracking.
///
/// Strips `\n` and `\r\n` terminators and counts lines from 1. Invalid UTF-8
/// is reported as an I/O error of kind [`io::ErrorKind::InvalidData`].
///
/// With a length limit set, at most `limit + 2` bytes of a line are pulled
/// from the buffer before [`CsvError::LineTooLong`] is returned, so a line
/// with no terminator is never held in memory whole.
///
/// # Examples
///
/// ```rust
/// use numcsv::LineReader;
/// use std::io::Cursor;
///
/// let mut lines = LineReader::new(Cursor::new("a,b\r\n1,2\n"));
///
/// assert_eq!(lines.next_line().unwrap(), Some((1, "a,b".to_string())));
/// assert_eq!(lines.next_line().unwrap(), Some((2, "1,2".to_string())));
/// assert_eq!(lines.next_line().unwrap(), None);
/// ```
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    max_line_length: usize,
    buffer: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    /// Create a new line reader with no length limit.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            max_line_length: 0,
            buffer: Vec::new(),
        }
    }

    /// Create with a specific buffer capacity and line length limit.
    ///
    /// A `max_line_length` of `0` disables the limit.
    pub fn with_capacity(reader: R, capacity: usize, max_line_length: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            max_line_length,
            buffer: Vec::new(),
        }
    }

    /// Number of the last line returned, 0 before the first read.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> CsvResult<Option<(usize, String)>> {
        self.buffer.clear();

        let read = if self.max_line_length > 0 {
            // Room for the longest allowed line plus a \r\n terminator
            let cap = self.max_line_length as u64 + 2;
            (&mut self.reader)
                .take(cap)
                .read_until(b'\n', &mut self.buffer)?
        } else {
            self.reader.read_until(b'\n', &mut self.buffer)?
        };
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
        }

        // An unterminated read that hit the cap is always over the limit here
        if self.max_line_length > 0 && self.buffer.len() > self.max_line_length {
            return Err(CsvError::LineTooLong {
                line: self.line_number,
                length: self.buffer.len(),
                limit: self.max_line_length,
            });
        }

        let line = std::str::from_utf8(&self.buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some((self.line_number, line.to_owned())))
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = CsvResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::{self, Cursor};
    use std::rc::Rc;

    #[test]
    fn test_read_lines() {
        let mut reader = LineReader::new(Cursor::new("1,2\n3,4\n5,6"));

        assert_eq!(reader.next_line().unwrap(), Some((1, "1,2".to_string())));
        assert_eq!(reader.next_line().unwrap(), Some((2, "3,4".to_string())));
        assert_eq!(reader.next_line().unwrap(), Some((3, "5,6".to_string())));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    // ==================== Empty input tests ====================

    #[test]
    fn test_empty_input() {
        let mut reader = LineReader::new(Cursor::new(""));
        assert_eq!(reader.next_line().unwrap(), None);
        assert_eq!(reader.line_number(), 0);
    }

    #[test]
    fn test_blank_lines_are_returned() {
        let mut reader = LineReader::new(Cursor::new("\n\n"));
        assert_eq!(reader.next_line().unwrap(), Some((1, String::new())));
        assert_eq!(reader.next_line().unwrap(), Some((2, String::new())));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    // ==================== Line ending tests ====================

    #[test]
    fn test_crlf_line_endings() {
        let mut reader = LineReader::new(Cursor::new("x,y\r\n1,2\r\n"));
        assert_eq!(reader.next_line().unwrap(), Some((1, "x,y".to_string())));
        assert_eq!(reader.next_line().unwrap(), Some((2, "1,2".to_string())));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_lone_carriage_return_kept() {
        // Only a \r directly before \n is part of the terminator
        let mut reader = LineReader::new(Cursor::new("1,2\r"));
        assert_eq!(reader.next_line().unwrap(), Some((1, "1,2\r".to_string())));
    }

    #[test]
    fn test_line_number_after_eof() {
        let mut reader = LineReader::new(Cursor::new("only"));
        reader.next_line().unwrap();
        reader.next_line().unwrap();
        assert_eq!(reader.line_number(), 1);
    }

    // ==================== Length limit tests ====================

    #[test]
    fn test_line_too_long() {
        let input = format!("1,2\n{}\n", "9".repeat(20));
        let mut reader = LineReader::with_capacity(Cursor::new(input), 8, 10);

        assert_eq!(reader.next_line().unwrap(), Some((1, "1,2".to_string())));
        match reader.next_line() {
            Err(CsvError::LineTooLong {
                line,
                length,
                limit,
            }) => {
                assert_eq!(line, 2);
                // Reading stops two bytes past the limit
                assert_eq!(length, 12);
                assert_eq!(limit, 10);
            }
            other => panic!("expected LineTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_one_byte_over_limit() {
        let mut reader = LineReader::with_capacity(Cursor::new("123456\r\n"), 4, 5);
        assert!(matches!(
            reader.next_line(),
            Err(CsvError::LineTooLong {
                line: 1,
                length: 6,
                limit: 5
            })
        ));
    }

    /// Endless stream of digits with no line terminator.
    struct EndlessDigits {
        pulled: Rc<Cell<usize>>,
    }

    impl Read for EndlessDigits {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            buf.fill(b'9');
            self.pulled.set(self.pulled.get() + buf.len());
            Ok(buf.len())
        }
    }

    #[test]
    fn test_unterminated_line_read_stops_at_limit() {
        let pulled = Rc::new(Cell::new(0));
        let source = EndlessDigits {
            pulled: Rc::clone(&pulled),
        };
        let mut reader = LineReader::with_capacity(source, 8, 16);

        assert!(matches!(
            reader.next_line(),
            Err(CsvError::LineTooLong { line: 1, limit: 16, .. })
        ));
        // At most one buffer fill beyond the capped read
        assert!(pulled.get() <= 16 + 2 + 8, "pulled {} bytes", pulled.get());
    }

    #[test]
    fn test_multibyte_char_at_cap_is_too_long() {
        // The cap splits the last character; the length check comes first
        let input = format!("{}\n", "\u{e9}".repeat(10));
        let mut reader = LineReader::with_capacity(Cursor::new(input), 8, 5);
        assert!(matches!(
            reader.next_line(),
            Err(CsvError::LineTooLong { .. })
        ));
    }

    #[test]
    fn test_limit_excludes_terminator() {
        let mut reader = LineReader::with_capacity(Cursor::new("12345\r\n"), 4, 5);
        assert_eq!(reader.next_line().unwrap(), Some((1, "12345".to_string())));
    }

    #[test]
    fn test_zero_limit_disables_check() {
        let long = "1".repeat(10_000);
        let mut reader = LineReader::with_capacity(Cursor::new(long.clone()), 16, 0);
        assert_eq!(reader.next_line().unwrap(), Some((1, long)));
    }

    // ==================== Error tests ====================

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let mut reader = LineReader::new(Cursor::new(vec![b'1', b',', 0xff, b'\n']));
        assert!(matches!(reader.next_line(), Err(CsvError::Io(_))));
    }

    struct FailingSource;

    impl Read for FailingSource {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_source_error_propagates() {
        let mut reader = LineReader::new(FailingSource);
        match reader.next_line() {
            Err(CsvError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("expected Io error, got {:?}", other.map(|_| ())),
        }
    }

    // ==================== Iterator tests ====================

    #[test]
    fn test_iterator() {
        let reader = LineReader::new(Cursor::new("a\nb\nc"));
        let lines: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
        assert_eq!(
            lines,
            vec![
                (1, "a".to_string()),
                (2, "b".to_string()),
                (3, "c".to_string())
            ]
        );
    }
}
