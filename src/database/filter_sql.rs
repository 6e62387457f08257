// ABOUTME: Renders ingredient filter constraints into SQLite json_each predicates
// ABOUTME: Produces a WHERE fragment with positional placeholders and its bind values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use recepti_matching::{Constraint, IngredientFilter, PantryQuery};
use std::collections::BTreeSet;

/// SQL predicate over the `recipes r` alias plus the values to bind, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlFilter {
    clauses: Vec<String>,
    params: Vec<String>,
}

impl SqlFilter {
    /// Render every constraint of an ingredient filter
    #[must_use]
    pub fn from_filter(filter: &IngredientFilter) -> Self {
        let mut sql = Self::default();
        for constraint in filter.constraints() {
            sql.push_constraint(constraint);
        }
        sql
    }

    /// Candidate pre-filter for pantry ranking
    ///
    /// Excluded allergens are applied in SQL and recipes sharing no key with
    /// the pantry are skipped; overlap counting is left to the ranker.
    #[must_use]
    pub fn for_pantry(query: &PantryQuery) -> Self {
        let mut sql = Self::default();
        if !query.excluded_allergens().is_empty() {
            sql.push_constraint(&Constraint::ExcludeAllergens(
                query.excluded_allergens().clone(),
            ));
        }
        sql.push_constraint(&Constraint::AnyOf(query.pantry_keys().clone()));
        sql
    }

    /// Restrict to one author
    pub fn push_author(&mut self, author_id: &str) {
        self.clauses.push("r.author_id = ?".to_owned());
        self.params.push(author_id.to_owned());
    }

    fn push_constraint(&mut self, constraint: &Constraint) {
        let keys = constraint.keys();
        if keys.is_empty() {
            // An empty any-of can never match
            if matches!(constraint, Constraint::AnyOf(_)) {
                self.clauses.push("0".to_owned());
            }
            return;
        }

        let clause = match constraint {
            Constraint::Include(_) => format!(
                "(SELECT COUNT(DISTINCT value) FROM json_each(r.ingredient_keys) WHERE value IN ({})) = {}",
                placeholders(keys),
                keys.len()
            ),
            Constraint::AnyOf(_) => format!(
                "EXISTS (SELECT 1 FROM json_each(r.ingredient_keys) WHERE value IN ({}))",
                placeholders(keys)
            ),
            Constraint::Exclude(_) => format!(
                "NOT EXISTS (SELECT 1 FROM json_each(r.ingredient_keys) WHERE value IN ({}))",
                placeholders(keys)
            ),
            Constraint::ExcludeAllergens(_) => format!(
                "NOT EXISTS (SELECT 1 FROM json_each(r.allergens) WHERE value IN ({}))",
                placeholders(keys)
            ),
        };
        self.clauses.push(clause);
        self.params.extend(keys.iter().cloned());
    }

    /// `WHERE ...` fragment, empty when there is nothing to filter
    #[must_use]
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Values to bind, in placeholder order
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }
}

fn placeholders(keys: &BTreeSet<String>) -> String {
    vec!["?"; keys.len()].join(", ")
}
