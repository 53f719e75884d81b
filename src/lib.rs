//! Convert bibliographic export files into BibTeX.
//!
//! `bibconvert` turns the export formats of common literature databases into a
//! canonical BibTeX bibliography, driven by declarative per-source mapping
//! tables. Three source dialects are supported:
//!
//! - **IEEE Xplore** — comma-delimited CSV with a header row
//! - **Scopus** — comma-delimited CSV with a header row
//! - **PubMed** — RIS-style line-oriented text with fixed-width field tags
//!
//! The conversion is a linear pipeline: read rows, preprocess, map field
//! names (syntax map), map controlled-vocabulary values (semantic map), clean
//! dialect quirks, emit BibTeX. Mapping tables live in two YAML files and are
//! loaded once into a [`MappingConfig`] that is passed by reference through
//! the pipeline.
//!
//! # Basic Usage
//!
//! ```
//! use bibconvert::{Dialect, MappingConfig, transform};
//! use bibconvert::ris::RisReader;
//!
//! let syntax = "pubmed:\n  - TI: title\n  - PT: ENTRYTYPE\n";
//! let semantic = "pubmed:\n  ENTRYTYPE:\n    Journal Article: article\n";
//! let config = MappingConfig::from_yaml(syntax, semantic).unwrap();
//!
//! let input = "TI  - Example Title\nPT  - Journal Article\n";
//! let reader = RisReader::new(input);
//! let entries = transform(Dialect::Pubmed, &config, reader.records()).unwrap();
//!
//! assert_eq!(entries[0].id, "pubmed_0");
//! assert_eq!(entries[0].get("title"), Some("Example Title"));
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return the crate [`Result`] wrapping
//! [`ConvertError`]. Vocabulary misses in the semantic map are intentionally
//! fatal: a raw value outside the controlled vocabulary surfaces as
//! [`ConvertError::UnknownValue`] rather than being silently passed through.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

extern crate csv as csv_crate;

pub mod bibtex;
pub mod clean;
pub mod csv;
pub mod mapping;
pub mod ris;
pub mod transform;

// Reexports
pub use mapping::MappingConfig;
pub use ris::RisReader;
pub use transform::transform;

/// A specialized Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Field name under which an entry's BibTeX type is stored until emission.
pub const ENTRY_TYPE: &str = "ENTRYTYPE";

/// Represents errors that can occur during conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("No semantic mapping for field {field}: {value:?}")]
    UnknownValue { field: String, value: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv_crate::Error> for ConvertError {
    fn from(err: csv_crate::Error) -> Self {
        ConvertError::InvalidFormat(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConvertError {
    fn from(err: serde_yaml::Error) -> Self {
        ConvertError::Config(err.to_string())
    }
}

/// A raw record read from a source file, keyed by source field tags.
pub type Record = HashMap<String, String>;

/// The source dialect of an input file.
///
/// Each dialect selects its own syntax map, semantic map, and cleaning rules.
/// Every record in one run uses exactly one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Ieee,
    Scopus,
    Pubmed,
}

impl Dialect {
    /// The lowercase dialect name used in mapping files and entry IDs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Ieee => "ieee",
            Dialect::Scopus => "scopus",
            Dialect::Pubmed => "pubmed",
        }
    }

    /// Whether input files for this dialect are tabular CSV (as opposed to
    /// RIS-style line records).
    pub fn is_csv(&self) -> bool {
        matches!(self, Dialect::Ieee | Dialect::Scopus)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ieee" => Ok(Dialect::Ieee),
            "scopus" => Ok(Dialect::Scopus),
            "pubmed" => Ok(Dialect::Pubmed),
            other => Err(ConvertError::UnknownDialect(other.to_string())),
        }
    }
}

/// A canonical bibliography entry produced by the pipeline.
///
/// Fields are kept sorted by name so that emission is deterministic. The
/// entry type is stored as a regular field under [`ENTRY_TYPE`] and consumed
/// by the emitter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Synthesized identifier, `{dialect}_{index}` in input order.
    pub id: String,
    fields: BTreeMap<String, String>,
}

impl Entry {
    /// Creates an empty entry with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Sets a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Returns the value of a field, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Removes a field, returning its value if it was set.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    /// Whether the entry has a value for the given field.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// The resolved BibTeX entry type, if the pipeline has set one.
    pub fn entry_type(&self) -> Option<&str> {
        self.get(ENTRY_TYPE)
    }

    /// Iterates over fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
