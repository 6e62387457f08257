// ABOUTME: Ingredient key normalization and synonym canonicalization
// ABOUTME: Turns free-text ingredient names into stable [a-z0-9_-] tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use std::collections::HashMap;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Built-in synonym pairs (normalized spelling, canonical key)
const BUILTIN_SYNONYMS: &[(&str, &str)] = &[
    ("paradajz", "rajcica"),
    ("tomato", "rajcica"),
    ("rice", "riza"),
    ("onion", "luk"),
    ("garlic", "cesnjak"),
    ("krompir", "krumpir"),
    ("orasi", "orah"),
];

/// Normalize free text into an ingredient key
///
/// Lowercases, strips accents (NFKD, combining marks dropped), removes
/// anything outside `[a-z0-9_-]` and whitespace, collapses whitespace and joins
/// words with `_`. Returns an empty string when nothing usable remains, which
/// callers treat as "no key".
///
/// ```
/// use recepti_matching::normalize_key;
///
/// assert_eq!(normalize_key("  Kikiriki   Maslac "), "kikiriki_maslac");
/// assert_eq!(normalize_key("Čokolada"), "cokolada");
/// ```
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    let kept: String = lowered
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-' || *c == '_'
        })
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Mapping from normalized spellings to canonical ingredient keys
///
/// Both sides are normalized on insertion, so lookups always use the output
/// of [`normalize_key`].
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: HashMap<String, String>,
}

impl SynonymTable {
    /// Empty table (canonicalization is the identity)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table with the built-in synonyms
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_SYNONYMS.iter().copied())
    }

    /// Build a table from `(spelling, canonical)` pairs
    ///
    /// Pairs whose spelling or canonical form normalizes to nothing are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .filter_map(|(from, to)| {
                let from = normalize_key(from.as_ref());
                let to = normalize_key(to.as_ref());
                (!from.is_empty() && !to.is_empty()).then_some((from, to))
            })
            .collect();
        Self { entries }
    }

    /// Map an already normalized key to its canonical form
    #[must_use]
    pub fn canonicalize(&self, key: &str) -> String {
        self.entries
            .get(key)
            .map_or_else(|| key.to_owned(), Clone::clone)
    }

    /// Normalize then canonicalize raw text
    #[must_use]
    pub fn canonical_key(&self, raw: &str) -> String {
        self.canonicalize(&normalize_key(raw))
    }

    /// Number of synonym entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
