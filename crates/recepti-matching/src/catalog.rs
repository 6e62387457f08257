// ABOUTME: Ingredient catalog pairing the synonym table with the allergen rule set
// ABOUTME: Built-in defaults or a YAML file loaded once at startup and shared read-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use crate::allergens::AllergenRuleSet;
use crate::normalize::{normalize_key, SynonymTable};
use recepti_core::errors::{AppError, AppResult, ErrorCode};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::info;

/// On-disk catalog layout
///
/// ```yaml
/// synonyms:
///   paradajz: rajčica
/// allergens:
///   mlijeko: [mlijeko, sir]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    synonyms: BTreeMap<String, String>,
    #[serde(default)]
    allergens: BTreeMap<String, Vec<String>>,
}

/// Immutable matching configuration injected into services
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    synonyms: SynonymTable,
    allergens: AllergenRuleSet,
}

impl IngredientCatalog {
    /// Catalog from explicit tables
    #[must_use]
    pub const fn new(synonyms: SynonymTable, allergens: AllergenRuleSet) -> Self {
        Self {
            synonyms,
            allergens,
        }
    }

    /// Catalog with the built-in synonyms and allergen rules
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(SynonymTable::builtin(), AllergenRuleSet::builtin())
    }

    /// Parse a YAML catalog
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the document is not a valid catalog
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ConfigInvalid,
                    format!("Invalid ingredient catalog: {e}"),
                )
            })?;

        Ok(Self::new(
            SynonymTable::from_pairs(file.synonyms),
            AllergenRuleSet::from_rules(file.allergens),
        ))
    }

    /// Load a YAML catalog from disk
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCode::ConfigInvalid,
                format!("Failed to read ingredient catalog {}: {e}", path.display()),
            )
        })?;
        let catalog = Self::from_yaml_str(&yaml)?;
        info!(
            path = %path.display(),
            synonyms = catalog.synonyms.len(),
            allergen_categories = catalog.allergens.len(),
            "Loaded ingredient catalog"
        );
        Ok(catalog)
    }

    /// Synonym table
    #[must_use]
    pub const fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Allergen rules
    #[must_use]
    pub const fn allergens(&self) -> &AllergenRuleSet {
        &self.allergens
    }

    /// Canonical key for one raw ingredient name
    #[must_use]
    pub fn canonical_key(&self, raw: &str) -> String {
        self.synonyms.canonical_key(raw)
    }

    /// Parse comma-separated user input into a set of canonical keys
    ///
    /// Blank segments and segments without usable characters are dropped.
    /// Never fails; garbage input yields an empty set.
    #[must_use]
    pub fn parse_csv(&self, csv: &str) -> BTreeSet<String> {
        csv.split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| self.synonyms.canonicalize(&normalize_key(segment)))
            .filter(|key| !key.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_normalizes_and_canonicalizes() {
        let catalog = IngredientCatalog::builtin();
        let keys = catalog.parse_csv(" Paradajz, Riža ,, tomato ,  ,Luk");
        let expected: BTreeSet<String> = ["luk", "rajcica", "riza"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_parse_csv_garbage_is_empty() {
        let catalog = IngredientCatalog::builtin();
        assert!(catalog.parse_csv("").is_empty());
        assert!(catalog.parse_csv(" , ,,").is_empty());
        assert!(catalog.parse_csv("!!, ??").is_empty());
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r"
synonyms:
  Kukuruz šećerac: kukuruz
allergens:
  celer: [celer, Celerov korijen]
";
        let catalog = IngredientCatalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.canonical_key("kukuruz secerac"), "kukuruz");
        assert_eq!(
            catalog.allergens().detect(&["celerov_korijen"], &[] as &[&str]),
            vec!["celer"]
        );
        // YAML catalogs replace the built-in tables
        assert_eq!(catalog.canonical_key("paradajz"), "paradajz");
    }

    #[test]
    fn test_from_yaml_str_rejects_unknown_fields() {
        let err = IngredientCatalog::from_yaml_str("colors: [red]").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, "synonyms:\n  tomato: rajcica\n").unwrap();

        let catalog = IngredientCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.canonical_key("Tomato"), "rajcica");
        assert!(catalog.allergens().is_empty());
    }

    #[test]
    fn test_from_file_missing() {
        let err = IngredientCatalog::from_file("/nonexistent/recepti/catalog.yaml").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid);
    }
}
