//! CSV row reader for tabular exports.
//!
//! IEEE Xplore and Scopus both export comma-delimited files with a header
//! row, sometimes prefixed with a UTF-8 byte-order mark. Rows are returned as
//! raw [`Record`]s keyed by header name, ready for the syntax map.
//!
//! # Example
//!
//! ```
//! use bibconvert::csv::read_rows;
//!
//! let input = "Title,Year\nExample Paper,2023\n";
//! let rows = read_rows(input).unwrap();
//! assert_eq!(rows[0]["Title"], "Example Paper");
//! ```

use csv::ReaderBuilder;

use crate::{Record, Result};

/// Reads all data rows of a comma-delimited input with a header row.
///
/// A leading byte-order mark is skipped if present. Rows with a column count
/// different from the header propagate as a parse error.
pub fn read_rows(input: &str) -> Result<Vec<Record>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut reader = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_reader(input.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = Record::new();
        for (i, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(i) {
                row.insert(header.clone(), value.to_string());
            }
        }
        rows.push(row);
    }

    Ok(rows)
}
