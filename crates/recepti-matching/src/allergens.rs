// ABOUTME: Rule-based allergen classifier over canonical keys and tokenized names
// ABOUTME: Exact token matching against per-category trigger sets, never substrings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use crate::normalize::normalize_key;
use std::collections::{BTreeMap, HashSet};

/// Built-in allergen categories and their trigger tokens
const BUILTIN_RULES: &[(&str, &[&str])] = &[
    (
        "orasasti_plodovi",
        &[
            "orah",
            "orasi",
            "badem",
            "badam",
            "ljesnjak",
            "lješnjak",
            "kikiriki",
            "pistacija",
            "indijski_orascic",
            "indijski_orascici",
            "ljesnjaci",
            "lješnjaci",
        ],
    ),
    (
        "mlijeko",
        &["mlijeko", "sir", "vrhnje", "maslac", "jogurt", "kefir", "skuta"],
    ),
    ("jaja", &["jaje", "jaja"]),
    (
        "gluten",
        &[
            "tjestenina",
            "kruh",
            "brasno",
            "pšenica",
            "psenica",
            "ječam",
            "jecam",
            "raž",
            "raz",
        ],
    ),
    ("soja", &["soja", "sojin_umak", "tofu"]),
    ("riba", &["riba", "tuna", "losos", "sardina", "inćun", "incun"]),
];

/// Allergen category name mapped to its normalized trigger tokens
///
/// Immutable after construction; share it behind `Arc` through
/// [`crate::IngredientCatalog`].
#[derive(Debug, Clone, Default)]
pub struct AllergenRuleSet {
    rules: BTreeMap<String, HashSet<String>>,
}

impl AllergenRuleSet {
    /// Rule set with the built-in categories
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_rules(
            BUILTIN_RULES
                .iter()
                .map(|(category, triggers)| (*category, triggers.iter().copied())),
        )
    }

    /// Build a rule set from `(category, triggers)` pairs
    ///
    /// Category names and triggers are normalized; triggers that normalize to
    /// nothing are dropped, and repeated categories merge their triggers.
    pub fn from_rules<I, C, T, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (C, T)>,
        C: AsRef<str>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut merged: BTreeMap<String, HashSet<String>> = BTreeMap::new();
        for (category, triggers) in rules {
            let category = normalize_key(category.as_ref());
            if category.is_empty() {
                continue;
            }
            let entry = merged.entry(category).or_default();
            entry.extend(
                triggers
                    .into_iter()
                    .map(|t| normalize_key(t.as_ref()))
                    .filter(|t| !t.is_empty()),
            );
        }
        Self { rules: merged }
    }

    /// Detect allergen categories for a recipe
    ///
    /// The token set is the canonical `keys` plus, for every raw name, its
    /// normalized form and each `_`-separated part of it. Returns the matching
    /// categories sorted, without duplicates.
    #[must_use]
    pub fn detect<K, N>(&self, keys: &[K], names: &[N]) -> Vec<String>
    where
        K: AsRef<str>,
        N: AsRef<str>,
    {
        let tokens = Self::token_set(keys, names);
        if tokens.is_empty() {
            return Vec::new();
        }

        // BTreeMap iteration keeps the output sorted
        self.rules
            .iter()
            .filter(|(_, triggers)| triggers.iter().any(|t| tokens.contains(t.as_str())))
            .map(|(category, _)| category.clone())
            .collect()
    }

    fn token_set<K, N>(keys: &[K], names: &[N]) -> HashSet<String>
    where
        K: AsRef<str>,
        N: AsRef<str>,
    {
        let mut tokens: HashSet<String> = keys
            .iter()
            .map(|k| k.as_ref().to_owned())
            .filter(|k| !k.is_empty())
            .collect();

        for name in names {
            let normalized = normalize_key(name.as_ref());
            if normalized.is_empty() {
                continue;
            }
            tokens.extend(
                normalized
                    .split('_')
                    .filter(|part| !part.is_empty())
                    .map(str::to_owned),
            );
            tokens.insert(normalized);
        }
        tokens
    }

    /// Category names, sorted
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Whether `category` is a known allergen category
    #[must_use]
    pub fn contains_category(&self, category: &str) -> bool {
        self.rules.contains_key(category)
    }

    /// Number of categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the rule set has no categories
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_NAMES: &[&str] = &[];
    const NO_KEYS: &[&str] = &[];

    #[test]
    fn test_single_key_detection() {
        let rules = AllergenRuleSet::builtin();
        assert_eq!(rules.detect(&["orah"], NO_NAMES), vec!["orasasti_plodovi"]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let rules = AllergenRuleSet::builtin();
        assert!(rules.detect(NO_KEYS, NO_NAMES).is_empty());
    }

    #[test]
    fn test_output_is_sorted_and_unique() {
        let rules = AllergenRuleSet::builtin();
        let found = rules.detect(
            &["mlijeko", "jaja", "brasno", "orah", "sir"],
            &["Brašno", "Mlijeko", "Jaja", "Orah"],
        );
        assert_eq!(found, vec!["gluten", "jaja", "mlijeko", "orasasti_plodovi"]);
    }

    #[test]
    fn test_name_parts_are_tokens() {
        let rules = AllergenRuleSet::builtin();
        // "kikiriki_maslac" is not a trigger but both of its parts are
        let found = rules.detect(&["kikiriki_maslac"], &["Kikiriki maslac"]);
        assert_eq!(found, vec!["mlijeko", "orasasti_plodovi"]);
    }

    #[test]
    fn test_exact_tokens_not_substrings() {
        let rules = AllergenRuleSet::builtin();
        // "sirup" contains "sir", "rizoto" contains "riz"
        assert!(rules.detect(&["sirup", "rizoto"], &["Sirup", "Rižoto"]).is_empty());
    }

    #[test]
    fn test_accented_triggers_collapse() {
        let rules = AllergenRuleSet::builtin();
        assert_eq!(rules.detect(&["psenica"], NO_NAMES), vec!["gluten"]);
        assert_eq!(rules.detect(NO_KEYS, &["Lješnjaci"]), vec!["orasasti_plodovi"]);
        assert_eq!(rules.detect(NO_KEYS, &["Inćun"]), vec!["riba"]);
    }

    #[test]
    fn test_names_are_not_canonicalized() {
        let rules = AllergenRuleSet::from_rules([("test", ["orah"])]);
        // "orasi" only reaches "orah" through synonyms, which detection does not apply
        assert!(rules.detect(NO_KEYS, &["Orasi"]).is_empty());
        assert_eq!(rules.detect(&["orah"], &["Orasi"]), vec!["test"]);
    }

    #[test]
    fn test_monotonic_in_tokens() {
        let rules = AllergenRuleSet::builtin();
        let base = rules.detect(&["tofu"], NO_NAMES);
        let more = rules.detect(&["tofu", "tuna", "luk"], NO_NAMES);
        assert!(base.iter().all(|c| more.contains(c)));
        assert_eq!(more, vec!["riba", "soja"]);
    }

    #[test]
    fn test_from_rules_merges_and_normalizes() {
        let rules = AllergenRuleSet::from_rules([
            ("Školjke", vec!["Dagnje", "  "]),
            ("skoljke", vec!["kamenice"]),
            ("", vec!["x"]),
        ]);
        assert_eq!(rules.len(), 1);
        assert!(rules.contains_category("skoljke"));
        assert_eq!(rules.detect(&["dagnje"], NO_NAMES), vec!["skoljke"]);
        assert_eq!(rules.detect(&["kamenice"], NO_NAMES), vec!["skoljke"]);
    }

    #[test]
    fn test_builtin_categories() {
        let rules = AllergenRuleSet::builtin();
        let categories: Vec<&str> = rules.categories().collect();
        assert_eq!(
            categories,
            vec!["gluten", "jaja", "mlijeko", "orasasti_plodovi", "riba", "soja"]
        );
    }
}
