//! Per-dialect entry cleaning.
//!
//! After syntax and semantic mapping, each entry goes through a universal
//! venue rule and a set of dialect-specific field fixups: author separator
//! canonicalization, Scopus author-name reassembly, PubMed DOI selection and
//! date truncation.

use itertools::Itertools;

use crate::{ConvertError, Dialect, ENTRY_TYPE, Entry, Result};

/// Scopus placeholder for records without author data.
const NO_AUTHOR_PLACEHOLDER: &str = "[No author name available]";

/// Cleans an entry in place according to its dialect.
///
/// The universal rule runs first: an `article` keeps `journal` and drops
/// `booktitle`, every other type keeps `booktitle` and drops `journal`, so
/// exactly one venue field survives.
///
/// # Errors
///
/// Returns [`ConvertError::MissingField`] if the entry has no resolved type.
pub fn clean_entry(entry: &mut Entry, dialect: Dialect) -> Result<()> {
    let is_article = entry
        .entry_type()
        .ok_or_else(|| ConvertError::MissingField(ENTRY_TYPE.to_string()))?
        == "article";

    if is_article {
        entry.remove("booktitle");
    } else {
        entry.remove("journal");
    }

    match dialect {
        Dialect::Ieee => join_author_list(entry),
        Dialect::Scopus => scopus_clean(entry),
        Dialect::Pubmed => {
            join_author_list(entry);
            pubmed_clean(entry);
        }
    }

    Ok(())
}

/// Canonicalizes the author separator from `"; "` to `" and "`.
fn join_author_list(entry: &mut Entry) {
    if let Some(authors) = entry.get("author") {
        let joined = authors.replace("; ", " and ");
        entry.insert("author", joined);
    }
}

fn scopus_clean(entry: &mut Entry) {
    if let Some(authors) = entry.get("author") {
        match scopus_author_canonicalize(authors) {
            Some(canonical) => entry.insert("author", canonical),
            None => {
                entry.remove("author");
            }
        }
    }
}

/// Reassembles a Scopus author string into BibTeX `and`-separated names.
///
/// Scopus flattens `Last, F., Last, F.` into one comma-separated string, and
/// names without initials lose their second token. Tokens are consumed in
/// pairs when the candidate given-name token carries a period; otherwise the
/// family-name token stands alone and consumption advances by one. Returns
/// `None` for the no-author placeholder, which callers should treat as an
/// absent field.
pub fn scopus_author_canonicalize(authors: &str) -> Option<String> {
    if authors == NO_AUTHOR_PLACEHOLDER {
        return None;
    }

    let tokens: Vec<&str> = authors.split(',').collect();
    let mut names = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match tokens.get(i + 1) {
            Some(given) if given.contains('.') => {
                names.push(format!("{}, {}", tokens[i].trim(), given.trim()));
                i += 2;
            }
            _ => {
                names.push(tokens[i].trim().to_string());
                i += 1;
            }
        }
    }

    Some(names.iter().join(" and "))
}

fn pubmed_clean(entry: &mut Entry) {
    // The doi field arrives as the full "; "-joined article ID list.
    if let Some(ids) = entry.get("doi") {
        match select_doi(ids) {
            Some(doi) => entry.insert("doi", doi),
            None => {
                entry.remove("doi");
            }
        }
    }
    // Publication dates look like "2020 Jan-Feb"; keep the year only.
    if let Some(year) = entry.get("year") {
        let truncated: String = year.chars().take(4).collect();
        entry.insert("year", truncated);
    }
}

/// Picks the DOI out of a `";"`-separated article ID list.
///
/// PubMed tags each ID with its scheme, e.g. `10.1000/xyz [doi]`. The last
/// token carrying the `[doi]` suffix wins; `None` means no DOI was present.
fn select_doi(ids: &str) -> Option<String> {
    let mut doi = None;
    for id in ids.split(';') {
        let id = id.trim();
        if let Some(stripped) = id.strip_suffix("[doi]") {
            doi = Some(stripped.trim().to_string());
        }
    }
    doi
}
