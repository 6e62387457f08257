// ABOUTME: Criterion benchmarks for the ingredient matching engine
// ABOUTME: Measures key normalization, allergen detection, filter evaluation and pantry ranking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! Criterion benchmarks for ingredient matching.
//!
//! Ranking is measured over synthetic corpora of increasing size so the cost
//! of the overlap scan and sort can be compared.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recepti_matching::{build_filter, normalize_key, IngredientCatalog, PantryQuery, PantryRanker};
use recepti_server::models::{IngredientEntry, Recipe};
use std::collections::BTreeSet;
use uuid::Uuid;

const INGREDIENT_POOL: &[&str] = &[
    "luk", "piletina", "riza", "rajcica", "cesnjak", "tjestenina", "mlijeko", "jaja", "sir",
    "brasno", "orah", "banana", "slanutak", "krumpir", "mrkva", "paprika", "tuna", "maslac",
];

const RAW_NAMES: &[&str] = &[
    "Piletina",
    "  Kikiriki   Maslac ",
    "Češnjak",
    "Zobene pahuljice",
    "Paradajz (svježi)",
    "Indijski oraščići",
];

/// Synthetic corpus with overlapping keys and every third recipe containing dairy
fn generate_recipes(count: usize) -> Vec<Recipe> {
    let now = Utc::now();
    (0..count)
        .map(|i| {
            let keys: BTreeSet<String> = (0..5)
                .map(|j| INGREDIENT_POOL[(i * 7 + j * 3) % INGREDIENT_POOL.len()].to_owned())
                .collect();
            let keys: Vec<String> = keys.into_iter().collect();
            let allergens = if i % 3 == 0 {
                vec!["mlijeko".to_owned()]
            } else {
                Vec::new()
            };

            Recipe {
                id: Uuid::new_v4(),
                author_id: Uuid::nil(),
                title: format!("Recept {i}"),
                description: String::new(),
                ingredients: keys
                    .iter()
                    .map(|key| IngredientEntry {
                        name: key.clone(),
                        key: key.clone(),
                        quantity: None,
                        unit: None,
                    })
                    .collect(),
                ingredient_keys: keys,
                steps: Vec::new(),
                allergens,
                created_at: now - Duration::seconds(i64::try_from(i).unwrap()),
            }
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let catalog = IngredientCatalog::builtin();
    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(RAW_NAMES.len() as u64));

    group.bench_function("normalize_key", |b| {
        b.iter(|| {
            for name in RAW_NAMES {
                black_box(normalize_key(black_box(name)));
            }
        });
    });

    group.bench_function("canonical_key", |b| {
        b.iter(|| {
            for name in RAW_NAMES {
                black_box(catalog.canonical_key(black_box(name)));
            }
        });
    });

    group.finish();
}

fn bench_allergen_detection(c: &mut Criterion) {
    let catalog = IngredientCatalog::builtin();
    let keys: Vec<String> = RAW_NAMES.iter().map(|n| catalog.canonical_key(n)).collect();

    c.bench_function("allergens/detect", |b| {
        b.iter(|| {
            black_box(
                catalog
                    .allergens()
                    .detect(black_box(keys.as_slice()), black_box(RAW_NAMES)),
            )
        });
    });
}

fn bench_filter(c: &mut Criterion) {
    let catalog = IngredientCatalog::builtin();
    let recipes = generate_recipes(1_000);
    let filter = build_filter(&catalog, "luk", "riza, tjestenina", "tuna", "mlijeko");

    let mut group = c.benchmark_group("filter");
    group.throughput(Throughput::Elements(recipes.len() as u64));
    group.bench_function("matches_1000", |b| {
        b.iter(|| recipes.iter().filter(|r| filter.matches(*r)).count());
    });
    group.finish();
}

fn bench_pantry_ranking(c: &mut Criterion) {
    let catalog = IngredientCatalog::builtin();
    let pantry = catalog.parse_csv("luk, piletina, riza, jaja, sir");
    let excluded = catalog.parse_csv("mlijeko");

    let mut group = c.benchmark_group("pantry_rank");
    for size in [100_usize, 1_000, 10_000] {
        let recipes = generate_recipes(size);
        let query = PantryQuery::new(pantry.clone(), 2, excluded.clone(), 50).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &recipes, |b, recipes| {
            b.iter(|| black_box(PantryRanker::rank(&query, recipes.iter().cloned())));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_allergen_detection,
    bench_filter,
    bench_pantry_ranking
);
criterion_main!(benches);
