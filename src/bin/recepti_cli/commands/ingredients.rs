// ABOUTME: Ingredient inspection commands for recepti-cli
// ABOUTME: Prints normalized keys, canonical keys and detected allergen categories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use recepti_matching::{normalize_key, IngredientCatalog, RecipeComposition};
use recepti_server::errors::AppResult;
use recepti_server::models::IngredientInput;

/// Print the normalized and canonical key of each name
pub fn normalize(catalog: &IngredientCatalog, names: &[String]) {
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

    println!("{:<width$}  {:<24}  canonical", "name", "normalized");
    println!("{}", "-".repeat(width + 40));
    for name in names {
        let normalized = normalize_key(name);
        let canonical = catalog.synonyms().canonicalize(&normalized);
        let canonical = if canonical.is_empty() { "(empty)" } else { canonical.as_str() };
        println!("{name:<width$}  {normalized:<24}  {canonical}");
    }
}

/// Print keys and allergens for a list of names
pub fn allergens(catalog: &IngredientCatalog, names: &[String]) -> AppResult<()> {
    let inputs: Vec<IngredientInput> = names.iter().map(IngredientInput::named).collect();
    let composition = RecipeComposition::from_inputs(catalog, &inputs)?;

    println!("Ingredients:");
    for entry in &composition.ingredients {
        println!("   {} -> {}", entry.name, entry.key);
    }
    println!("Keys:      {}", composition.ingredient_keys.join(", "));
    if composition.allergens.is_empty() {
        println!("Allergens: none detected");
    } else {
        println!("Allergens: {}", composition.allergens.join(", "));
    }
    Ok(())
}
