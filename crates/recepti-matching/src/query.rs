// ABOUTME: Query builder turning comma-separated user input into an ingredient filter
// ABOUTME: Constraints are exposed as data for storage backends and evaluated in process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use crate::catalog::IngredientCatalog;
use crate::profile::IngredientProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One clause of an ingredient filter, each over a non-empty key set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "keys", rename_all = "snake_case")]
pub enum Constraint {
    /// Recipe keys must contain every key
    Include(BTreeSet<String>),
    /// Recipe keys must contain at least one key
    AnyOf(BTreeSet<String>),
    /// Recipe keys must contain none of the keys
    Exclude(BTreeSet<String>),
    /// Recipe allergens must contain none of the categories
    ExcludeAllergens(BTreeSet<String>),
}

impl Constraint {
    /// The key set this clause ranges over
    #[must_use]
    pub const fn keys(&self) -> &BTreeSet<String> {
        match self {
            Self::Include(keys)
            | Self::AnyOf(keys)
            | Self::Exclude(keys)
            | Self::ExcludeAllergens(keys) => keys,
        }
    }

    /// Evaluate this clause against a recipe
    pub fn matches<R: IngredientProfile + ?Sized>(&self, recipe: &R) -> bool {
        let has_key = |key: &String| recipe.ingredient_keys().contains(key);
        match self {
            Self::Include(keys) => keys.iter().all(has_key),
            Self::AnyOf(keys) => keys.iter().any(has_key),
            Self::Exclude(keys) => !keys.iter().any(has_key),
            Self::ExcludeAllergens(categories) => !recipe
                .allergens()
                .iter()
                .any(|allergen| categories.contains(allergen)),
        }
    }
}

/// Conjunction of constraints; no constraints matches every recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientFilter {
    constraints: Vec<Constraint>,
}

impl IngredientFilter {
    /// Filter from raw key sets, dropping empty sets
    #[must_use]
    pub fn from_sets(
        include: BTreeSet<String>,
        any_of: BTreeSet<String>,
        exclude: BTreeSet<String>,
        exclude_allergens: BTreeSet<String>,
    ) -> Self {
        let constraints = [
            Constraint::Include(include),
            Constraint::AnyOf(any_of),
            Constraint::Exclude(exclude),
            Constraint::ExcludeAllergens(exclude_allergens),
        ]
        .into_iter()
        .filter(|constraint| !constraint.keys().is_empty())
        .collect();
        Self { constraints }
    }

    /// Constraints in evaluation order
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Whether the filter accepts every recipe
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Evaluate every constraint against a recipe
    pub fn matches<R: IngredientProfile + ?Sized>(&self, recipe: &R) -> bool {
        self.constraints.iter().all(|c| c.matches(recipe))
    }
}

/// Build a filter from comma-separated user input
///
/// Every argument is parsed with [`IngredientCatalog::parse_csv`]; arguments
/// that parse to nothing add no constraint.
#[must_use]
pub fn build_filter(
    catalog: &IngredientCatalog,
    include_csv: &str,
    any_of_csv: &str,
    exclude_csv: &str,
    exclude_allergens_csv: &str,
) -> IngredientFilter {
    IngredientFilter::from_sets(
        catalog.parse_csv(include_csv),
        catalog.parse_csv(any_of_csv),
        catalog.parse_csv(exclude_csv),
        catalog.parse_csv(exclude_allergens_csv),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    struct Fixture {
        id: Uuid,
        keys: Vec<String>,
        allergens: Vec<String>,
    }

    impl Fixture {
        fn new(keys: &[&str], allergens: &[&str]) -> Self {
            Self {
                id: Uuid::new_v4(),
                keys: keys.iter().map(|k| (*k).to_owned()).collect(),
                allergens: allergens.iter().map(|a| (*a).to_owned()).collect(),
            }
        }
    }

    impl IngredientProfile for Fixture {
        fn id(&self) -> Uuid {
            self.id
        }
        fn ingredient_keys(&self) -> &[String] {
            &self.keys
        }
        fn allergens(&self) -> &[String] {
            &self.allergens
        }
        fn created_at(&self) -> DateTime<Utc> {
            DateTime::<Utc>::UNIX_EPOCH
        }
    }

    fn filter(inc: &str, any: &str, exc: &str, exa: &str) -> IngredientFilter {
        build_filter(&IngredientCatalog::builtin(), inc, any, exc, exa)
    }

    #[test]
    fn test_empty_input_is_unconstrained() {
        let f = filter("", " , ", "!!", "");
        assert!(f.is_unconstrained());
        assert!(f.matches(&Fixture::new(&[], &[])));
        assert!(f.matches(&Fixture::new(&["luk"], &["gluten"])));
    }

    #[test]
    fn test_include_requires_superset() {
        let f = filter("Luk, Piletina", "", "", "");
        assert!(f.matches(&Fixture::new(&["luk", "piletina", "riza"], &[])));
        assert!(f.matches(&Fixture::new(&["luk", "piletina"], &[])));
        assert!(!f.matches(&Fixture::new(&["luk", "riza"], &[])));
    }

    #[test]
    fn test_any_of_requires_overlap() {
        let f = filter("", "tofu, Paradajz", "", "");
        assert!(f.matches(&Fixture::new(&["rajcica", "tjestenina"], &[])));
        assert!(!f.matches(&Fixture::new(&["luk"], &[])));
        assert!(!f.matches(&Fixture::new(&[], &[])));
    }

    #[test]
    fn test_exclude_rejects_overlap() {
        let f = filter("", "", "Onion", "");
        assert!(!f.matches(&Fixture::new(&["luk", "slanutak"], &[])));
        assert!(f.matches(&Fixture::new(&["slanutak"], &[])));
    }

    #[test]
    fn test_exclude_allergens() {
        let f = filter("", "", "", "mlijeko");
        assert!(!f.matches(&Fixture::new(&["sir", "jaja"], &["jaja", "mlijeko"])));
        assert!(f.matches(&Fixture::new(&["piletina"], &[])));
    }

    #[test]
    fn test_constraints_are_anded_in_order() {
        let f = filter("rajcica", "tjestenina, riza", "luk", "gluten");
        let kinds: Vec<&str> = f
            .constraints()
            .iter()
            .map(|c| match c {
                Constraint::Include(_) => "include",
                Constraint::AnyOf(_) => "any_of",
                Constraint::Exclude(_) => "exclude",
                Constraint::ExcludeAllergens(_) => "exclude_allergens",
            })
            .collect();
        assert_eq!(kinds, vec!["include", "any_of", "exclude", "exclude_allergens"]);

        // tjestenina brings gluten
        assert!(!f.matches(&Fixture::new(&["cesnjak", "rajcica", "tjestenina"], &["gluten"])));
        assert!(f.matches(&Fixture::new(&["rajcica", "riza"], &[])));
        assert!(!f.matches(&Fixture::new(&["luk", "rajcica", "riza"], &[])));
    }

    #[test]
    fn test_constraint_serializes_as_tagged_data() {
        let f = filter("Luk", "", "", "");
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"constraints": [{"kind": "include", "keys": ["luk"]}]})
        );
    }
}
