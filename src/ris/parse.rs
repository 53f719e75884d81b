//! Line-level decoding of RIS-style records.

use crate::Record;

/// Number of leading characters forming the field tag.
const TAG_WIDTH: usize = 4;
/// Character offset at which the field value starts.
const VALUE_OFFSET: usize = 6;

/// Build a record from the lines of one RIS entry.
///
/// Each line carries a field tag in its first four characters and a value
/// from position six onward. A line with an empty tag continues the previous
/// field, joined with a single space. A tag repeated within the record
/// appends to the existing value with `"; "` (repeated fields such as
/// multiple identifiers).
pub(crate) fn record_from_lines(lines: &[&str]) -> Record {
    let mut record = Record::new();
    let mut last_key: Option<String> = None;

    for line in lines {
        let (key, value) = split_line(line);
        if key.is_empty() {
            // Continuation of the previous field. A continuation before any
            // keyed line has nothing to attach to and is dropped.
            if let Some(prev) = last_key.as_ref().and_then(|k| record.get_mut(k)) {
                prev.push(' ');
                prev.push_str(value);
            }
        } else {
            record
                .entry(key.clone())
                .and_modify(|existing| {
                    existing.push_str("; ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
            last_key = Some(key);
        }
    }

    record
}

/// Split one line into its trimmed tag and value portions.
///
/// Lines shorter than the fixed offsets are handled leniently: a line
/// shorter than the tag region uses all of it as the tag, and a line with no
/// character at the value offset has an empty value. Empty values are later
/// discarded by the syntax map's non-emptiness check.
fn split_line(line: &str) -> (String, &str) {
    let tag: String = line.chars().take(TAG_WIDTH).collect::<String>().trim().to_string();
    let value = line
        .char_indices()
        .nth(VALUE_OFFSET)
        .map(|(i, _)| line[i..].trim())
        .unwrap_or("");
    (tag, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("AU  - Smith, J.", "AU", "Smith, J.")]
    #[case("PMID- 12345678", "PMID", "12345678")]
    #[case("TI  - ", "TI", "")]
    #[case("      continued text", "", "continued text")]
    #[case("ER", "ER", "")]
    #[case("", "", "")]
    fn test_split_line(#[case] line: &str, #[case] tag: &str, #[case] value: &str) {
        let (k, v) = split_line(line);
        assert_eq!(k, tag);
        assert_eq!(v, value);
    }

    #[test]
    fn test_continuation_appends_with_space() {
        let lines = ["AU  - Smith, J.", "      continued"];
        let record = record_from_lines(&lines);
        assert_eq!(record["AU"], "Smith, J. continued");
    }

    #[test]
    fn test_repeated_tag_joins_with_semicolon() {
        let lines = [
            "AU  - Smith, John",
            "AU  - Doe, Jane",
            "AID - 12345 [pmid]",
            "AID - 10.1000/xyz [doi]",
        ];
        let record = record_from_lines(&lines);
        assert_eq!(record["AU"], "Smith, John; Doe, Jane");
        assert_eq!(record["AID"], "12345 [pmid]; 10.1000/xyz [doi]");
    }

    #[test]
    fn test_continuation_of_repeated_tag() {
        let lines = ["AU  - Smith, John", "AU  - Doe,", "      Jane"];
        let record = record_from_lines(&lines);
        assert_eq!(record["AU"], "Smith, John; Doe, Jane");
    }

    #[test]
    fn test_leading_continuation_is_dropped() {
        let lines = ["      orphan", "TI  - Title"];
        let record = record_from_lines(&lines);
        assert_eq!(record.len(), 1);
        assert_eq!(record["TI"], "Title");
    }
}
