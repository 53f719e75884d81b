//! RIS-style line-record reader.
//!
//! Reads the line-oriented export format used by PubMed: fixed-width field
//! tags, continuation lines, and blank lines between records.
//!
//! # Example
//!
//! ```
//! use bibconvert::ris::RisReader;
//!
//! let input = "AU  - Smith, J.\nTI  - A Title\n\nAU  - Doe, J.\nTI  - Another\n";
//! let reader = RisReader::new(input);
//!
//! let records: Vec<_> = reader.records().collect();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0]["AU"], "Smith, J.");
//! ```

mod parse;

use crate::Record;
use parse::record_from_lines;

/// Reader over the full text of a RIS-formatted file.
///
/// The reader borrows the input and hands out iterators over its records;
/// calling [`records`](RisReader::records) again restarts from the beginning
/// of the content.
#[derive(Debug, Clone, Copy)]
pub struct RisReader<'a> {
    input: &'a str,
}

impl<'a> RisReader<'a> {
    /// Creates a reader over the given input text.
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Returns an iterator over the records in the input, from the start.
    pub fn records(&self) -> Records<'a> {
        Records {
            lines: self.input.lines(),
        }
    }
}

/// Iterator over the records of a RIS-formatted input.
///
/// Record boundaries are blank lines. Input ending without a trailing blank
/// line still yields its final record; runs of blank lines never produce
/// empty records.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    lines: std::str::Lines<'a>,
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let mut pending: Vec<&str> = Vec::new();
        for line in self.lines.by_ref() {
            if line.trim().is_empty() {
                if pending.is_empty() {
                    continue;
                }
                return Some(record_from_lines(&pending));
            }
            pending.push(line);
        }
        if pending.is_empty() {
            None
        } else {
            Some(record_from_lines(&pending))
        }
    }
}
