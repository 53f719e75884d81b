//! The record transform pipeline.
//!
//! Orchestrates the conversion of raw source records into canonical entries:
//! preprocess → syntax map → semantic map → clean, with identifiers
//! synthesized from the dialect and the 0-based input position.

use crate::clean::clean_entry;
use crate::mapping::MappingConfig;
use crate::{ConvertError, Dialect, ENTRY_TYPE, Entry, Record, Result};

/// Entry type assumed when a PubMed record lists no recognized publication type.
const PUBMED_FALLBACK_TYPE: &str = "Journal Article";

/// Transforms a sequence of raw records into canonical entries.
///
/// Records are processed in order and never dropped: the output length always
/// equals the input length, and entry `i` carries the identifier
/// `{dialect}_{i}`.
///
/// # Errors
///
/// Propagates configuration errors (missing dialect mappings), semantic
/// vocabulary misses, and missing entry types at the clean stage.
pub fn transform<I>(dialect: Dialect, config: &MappingConfig, rows: I) -> Result<Vec<Entry>>
where
    I: IntoIterator<Item = Record>,
{
    let mut entries = Vec::new();
    for (i, row) in rows.into_iter().enumerate() {
        let row = preprocess(dialect, config, row)?;
        let mut entry = syntax_map(i, &row, dialect, config)?;
        semantic_map(&mut entry, dialect, config)?;
        clean_entry(&mut entry, dialect)?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Dialect-specific record-level preprocessing; identity for the CSV dialects.
fn preprocess(dialect: Dialect, config: &MappingConfig, row: Record) -> Result<Record> {
    match dialect {
        Dialect::Ieee | Dialect::Scopus => Ok(row),
        Dialect::Pubmed => pubmed_select_type(config, row),
    }
}

/// Narrows the PubMed `PT` field down to a single publication type.
///
/// PubMed records list several publication types joined with `"; "`. The
/// first one (in document order) that appears in the dialect's `ENTRYTYPE`
/// vocabulary wins; records with no recognized type fall back to
/// `"Journal Article"`. A record without a `PT` field passes through
/// unchanged and fails later at the clean stage.
fn pubmed_select_type(config: &MappingConfig, mut row: Record) -> Result<Record> {
    let semantic = config.semantic_map(Dialect::Pubmed)?;
    let vocabulary = semantic.get(ENTRY_TYPE).ok_or_else(|| {
        ConvertError::Config(format!(
            "pubmed semantic mapping has no {ENTRY_TYPE} vocabulary"
        ))
    })?;

    if let Some(types) = row.get_mut("PT") {
        let selected = types
            .split("; ")
            .find(|candidate| vocabulary.contains_key(*candidate))
            .unwrap_or(PUBMED_FALLBACK_TYPE);
        *types = selected.to_string();
    }

    Ok(row)
}

/// Builds an entry from a raw record by applying the dialect's syntax rules.
///
/// Rules are applied in table order; a rule only fires when its raw field is
/// present and non-empty, and later rules overwrite earlier ones targeting
/// the same canonical field.
fn syntax_map(i: usize, row: &Record, dialect: Dialect, config: &MappingConfig) -> Result<Entry> {
    let mut entry = Entry::new(format!("{dialect}_{i}"));
    for rule in config.syntax_map(dialect)? {
        if let Some(value) = row.get(&rule.raw) {
            if !value.is_empty() {
                entry.insert(rule.canonical.clone(), value.clone());
            }
        }
    }
    Ok(entry)
}

/// Replaces controlled-vocabulary values with their canonical translations.
///
/// Only fields that have a vocabulary table are touched. A raw value missing
/// from its vocabulary is a fatal error rather than a silent pass-through.
fn semantic_map(entry: &mut Entry, dialect: Dialect, config: &MappingConfig) -> Result<()> {
    let semantic = config.semantic_map(dialect)?;

    let mapped_fields: Vec<(String, String)> = entry
        .fields()
        .filter(|(key, _)| semantic.contains_key(*key))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    for (key, value) in mapped_fields {
        let canonical = semantic[&key]
            .get(&value)
            .ok_or_else(|| ConvertError::UnknownValue {
                field: key.clone(),
                value,
            })?;
        entry.insert(key, canonical.clone());
    }

    Ok(())
}
