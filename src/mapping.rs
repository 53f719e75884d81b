//! Dialect mapping tables.
//!
//! Two declarative YAML resources drive the conversion, each keyed by dialect
//! name:
//!
//! - the **syntax map**, an ordered sequence of single-entry maps translating
//!   raw source field names to canonical BibTeX field names, and
//! - the **semantic map**, nested maps translating raw field values to a
//!   canonical controlled vocabulary, keyed by canonical field name.
//!
//! Both are loaded once into a [`MappingConfig`] that the caller passes by
//! reference into the pipeline, preserving single-load semantics without a
//! process-wide cache.
//!
//! # Example
//!
//! ```
//! use bibconvert::{Dialect, MappingConfig};
//!
//! let syntax = "ieee:\n  - Document Title: title\n  - Authors: author\n";
//! let semantic = "ieee:\n  ENTRYTYPE:\n    IEEE Journals: article\n";
//! let config = MappingConfig::from_yaml(syntax, semantic).unwrap();
//!
//! let rules = config.syntax_map(Dialect::Ieee).unwrap();
//! assert_eq!(rules[0].raw, "Document Title");
//! assert_eq!(rules[0].canonical, "title");
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::{ConvertError, Dialect, Result};

/// Relative location of the syntax mapping definitions.
pub const SYNTAX_MAPPING_FILE: &str = "syntax_mapping.yaml";
/// Relative location of the semantic mapping definitions.
pub const SEMANTIC_MAPPING_FILE: &str = "semantic_mapping.yaml";

/// Raw deserialized shape: dialect name → sequence of single-entry maps.
type RawSyntax = HashMap<String, Vec<HashMap<String, String>>>;
/// Raw deserialized shape: dialect name → canonical field → vocabulary.
type RawSemantic = HashMap<String, HashMap<String, HashMap<String, String>>>;

/// Vocabulary translation for one canonical field: raw value → canonical value.
pub type Vocabulary = HashMap<String, String>;

/// One syntax rule: copy a raw source field into a canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxRule {
    /// Field name as it appears in the source file.
    pub raw: String,
    /// Canonical BibTeX field name.
    pub canonical: String,
}

/// Loaded mapping tables for all dialects.
#[derive(Debug, Clone, Default)]
pub struct MappingConfig {
    syntax: HashMap<Dialect, Vec<SyntaxRule>>,
    semantic: HashMap<Dialect, HashMap<String, Vocabulary>>,
}

impl MappingConfig {
    /// Loads the mapping definitions from their fixed relative locations.
    pub fn load_default() -> Result<Self> {
        Self::load(
            Path::new(SYNTAX_MAPPING_FILE),
            Path::new(SEMANTIC_MAPPING_FILE),
        )
    }

    /// Loads the mapping definitions from explicit paths.
    pub fn load(syntax_path: &Path, semantic_path: &Path) -> Result<Self> {
        let syntax = fs::read_to_string(syntax_path)?;
        let semantic = fs::read_to_string(semantic_path)?;
        Self::from_yaml(&syntax, &semantic)
    }

    /// Parses mapping definitions from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed YAML or for a top-level
    /// key that is not a known dialect name.
    pub fn from_yaml(syntax_yaml: &str, semantic_yaml: &str) -> Result<Self> {
        let raw_syntax: RawSyntax = serde_yaml::from_str(syntax_yaml)?;
        let raw_semantic: RawSemantic = serde_yaml::from_str(semantic_yaml)?;

        let mut syntax = HashMap::new();
        for (name, rules) in raw_syntax {
            let dialect: Dialect = name.parse()?;
            let rules = rules
                .into_iter()
                .flat_map(|rule| {
                    rule.into_iter().map(|(raw, canonical)| SyntaxRule {
                        raw,
                        canonical,
                    })
                })
                .collect();
            syntax.insert(dialect, rules);
        }

        let mut semantic = HashMap::new();
        for (name, tables) in raw_semantic {
            let dialect: Dialect = name.parse()?;
            semantic.insert(dialect, tables);
        }

        Ok(Self { syntax, semantic })
    }

    /// The ordered syntax rules for a dialect.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the loaded definitions have no entry
    /// for the dialect.
    pub fn syntax_map(&self, dialect: Dialect) -> Result<&[SyntaxRule]> {
        self.syntax
            .get(&dialect)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                ConvertError::Config(format!("no syntax mapping defined for dialect {dialect}"))
            })
    }

    /// The semantic vocabulary tables for a dialect.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the loaded definitions have no entry
    /// for the dialect.
    pub fn semantic_map(&self, dialect: Dialect) -> Result<&HashMap<String, Vocabulary>> {
        self.semantic.get(&dialect).ok_or_else(|| {
            ConvertError::Config(format!("no semantic mapping defined for dialect {dialect}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SYNTAX: &str = "\
scopus:
  - Title: title
  - Source title: journal
  - Source title: booktitle
pubmed:
  - TI: title
";

    const SEMANTIC: &str = "\
scopus:
  ENTRYTYPE:
    Article: article
    Conference Paper: inproceedings
pubmed:
  ENTRYTYPE:
    Journal Article: article
";

    #[test]
    fn test_syntax_rules_preserve_order() {
        let config = MappingConfig::from_yaml(SYNTAX, SEMANTIC).unwrap();
        let rules = config.syntax_map(Dialect::Scopus).unwrap();
        let pairs: Vec<(&str, &str)> = rules
            .iter()
            .map(|r| (r.raw.as_str(), r.canonical.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Title", "title"),
                ("Source title", "journal"),
                ("Source title", "booktitle"),
            ]
        );
    }

    #[test]
    fn test_semantic_lookup() {
        let config = MappingConfig::from_yaml(SYNTAX, SEMANTIC).unwrap();
        let tables = config.semantic_map(Dialect::Scopus).unwrap();
        assert_eq!(tables["ENTRYTYPE"]["Conference Paper"], "inproceedings");
    }

    #[test]
    fn test_missing_dialect_is_config_error() {
        let config = MappingConfig::from_yaml(SYNTAX, SEMANTIC).unwrap();
        assert!(matches!(
            config.syntax_map(Dialect::Ieee),
            Err(ConvertError::Config(_))
        ));
        assert!(matches!(
            config.semantic_map(Dialect::Ieee),
            Err(ConvertError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_dialect_key_rejected() {
        let result = MappingConfig::from_yaml("endnote:\n  - T1: title\n", SEMANTIC);
        assert!(matches!(result, Err(ConvertError::UnknownDialect(_))));
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let result = MappingConfig::from_yaml("scopus: [not: {a valid", SEMANTIC);
        assert!(matches!(result, Err(ConvertError::Config(_))));
    }

    #[test]
    fn test_shipped_mappings_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let config = MappingConfig::load(
            &dir.join(SYNTAX_MAPPING_FILE),
            &dir.join(SEMANTIC_MAPPING_FILE),
        )
        .unwrap();
        for dialect in [Dialect::Ieee, Dialect::Scopus, Dialect::Pubmed] {
            assert!(!config.syntax_map(dialect).unwrap().is_empty());
            assert!(
                config
                    .semantic_map(dialect)
                    .unwrap()
                    .contains_key(crate::ENTRY_TYPE)
            );
        }
    }
}
