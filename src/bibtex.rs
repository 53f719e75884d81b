//! BibTeX emitter.
//!
//! Serializes canonical entries to BibTeX text: entries in input order,
//! fields in alphabetical order, values delimited by braces.
//!
//! # Example
//!
//! ```
//! use bibconvert::{ENTRY_TYPE, Entry};
//! use bibconvert::bibtex::to_string;
//!
//! let mut entry = Entry::new("ieee_0");
//! entry.insert(ENTRY_TYPE, "article");
//! entry.insert("title", "Example");
//! let output = to_string(&[entry]).unwrap();
//! assert!(output.starts_with("@article{ieee_0,"));
//! ```

use std::io::Write;

use crate::{ConvertError, ENTRY_TYPE, Entry, Result};

/// Writes a bibliography to the given writer, one BibTeX entry per record.
///
/// # Errors
///
/// Returns [`ConvertError::MissingField`] for an entry without a resolved
/// type, and propagates IO errors from the writer.
pub fn write_bibliography<W: Write>(writer: &mut W, entries: &[Entry]) -> Result<()> {
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        write_entry(writer, entry)?;
    }
    Ok(())
}

/// Renders a bibliography to a string.
pub fn to_string(entries: &[Entry]) -> Result<String> {
    let mut buffer = Vec::new();
    write_bibliography(&mut buffer, entries)?;
    String::from_utf8(buffer).map_err(|e| ConvertError::InvalidFormat(e.to_string()))
}

fn write_entry<W: Write>(writer: &mut W, entry: &Entry) -> Result<()> {
    let entry_type = entry
        .entry_type()
        .ok_or_else(|| ConvertError::MissingField(ENTRY_TYPE.to_string()))?;

    writeln!(writer, "@{}{{{},", entry_type, entry.id)?;

    // Entry fields iterate in name order already; the type is emitted as the
    // @-prefix and skipped here.
    let fields: Vec<(&str, &str)> = entry.fields().filter(|(key, _)| *key != ENTRY_TYPE).collect();
    for (i, (key, value)) in fields.iter().enumerate() {
        let separator = if i + 1 < fields.len() { "," } else { "" };
        writeln!(writer, " {key} = {{{value}}}{separator}")?;
    }

    writeln!(writer, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn article(id: &str, fields: &[(&str, &str)]) -> Entry {
        let mut entry = Entry::new(id);
        entry.insert(ENTRY_TYPE, "article");
        for (k, v) in fields {
            entry.insert(*k, *v);
        }
        entry
    }

    #[test]
    fn test_single_entry_layout() {
        let entry = article(
            "pubmed_0",
            &[
                ("year", "2020"),
                ("author", "Smith, John"),
                ("title", "A Title"),
            ],
        );
        let output = to_string(&[entry]).unwrap();
        assert_eq!(
            output,
            "@article{pubmed_0,\n author = {Smith, John},\n title = {A Title},\n year = {2020}\n}\n"
        );
    }

    #[test]
    fn test_entries_in_input_order() {
        let entries = vec![
            article("scopus_0", &[("title", "First")]),
            article("scopus_1", &[("title", "Second")]),
        ];
        let output = to_string(&entries).unwrap();
        assert_eq!(
            output,
            "@article{scopus_0,\n title = {First}\n}\n\n@article{scopus_1,\n title = {Second}\n}\n"
        );
    }

    #[test]
    fn test_entry_without_type_is_error() {
        let mut entry = Entry::new("ieee_0");
        entry.insert("title", "No type");
        assert!(matches!(
            to_string(&[entry]),
            Err(ConvertError::MissingField(_))
        ));
    }

    #[test]
    fn test_empty_bibliography() {
        assert_eq!(to_string(&[]).unwrap(), "");
    }
}
