// ABOUTME: Demo data seeding for recepti-cli
// ABOUTME: Registers three users and their six recipes through the services so keys and allergens are computed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use recepti_server::{
    config::ServerConfig,
    errors::AppResult,
    models::{CreateRecipeRequest, IngredientInput, RegisterRequest},
    resources::ServerResources,
};
use tracing::{info, warn};

struct DemoUser {
    username: &'static str,
    display_name: &'static str,
    bio: &'static str,
    recipes: &'static [DemoRecipe],
}

struct DemoRecipe {
    title: &'static str,
    description: &'static str,
    ingredients: &'static [(&'static str, f64, &'static str)],
    steps: &'static [&'static str],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        username: "ana",
        display_name: "Ana Horvat",
        bio: "Brzi ručkovi i mediteranska kuhinja.",
        recipes: &[
            DemoRecipe {
                title: "Piletina s rižom",
                description: "Brzo i fino.",
                ingredients: &[("Piletina", 300.0, "g"), ("Riža", 200.0, "g"), ("Luk", 1.0, "kom")],
                steps: &["Skuhaj rižu", "Ispeci piletinu", "Dodaj luk"],
            },
            DemoRecipe {
                title: "Tjestenina s rajčicom",
                description: "Klasika za 15 minuta.",
                ingredients: &[
                    ("Tjestenina", 250.0, "g"),
                    ("Rajčica", 3.0, "kom"),
                    ("Češnjak", 2.0, "cesanj"),
                ],
                steps: &["Skuhaj tjesteninu", "Skuhaj umak", "Pomiješaj i posluži"],
            },
        ],
    },
    DemoUser {
        username: "ivan",
        display_name: "Ivan Novak",
        bio: "Fitness + meal-prep recepti.",
        recipes: &[
            DemoRecipe {
                title: "Zobena kaša s bananom",
                description: "Doručak bez komplikacija.",
                ingredients: &[
                    ("Zobene pahuljice", 60.0, "g"),
                    ("Mlijeko", 250.0, "ml"),
                    ("Banana", 1.0, "kom"),
                ],
                steps: &["Skuhaj zob u mlijeku", "Dodaj narezanu bananu"],
            },
            DemoRecipe {
                title: "Proteinski omlet",
                description: "Brz obrok s puno proteina.",
                ingredients: &[("Jaja", 3.0, "kom"), ("Šunka", 80.0, "g"), ("Sir", 50.0, "g")],
                steps: &["Umuti jaja", "Dodaj šunku i sir", "Ispeci na tavi"],
            },
        ],
    },
    DemoUser {
        username: "maja",
        display_name: "Maja Kovač",
        bio: "Volim slastice i vegetarijanska jela.",
        recipes: &[
            DemoRecipe {
                title: "Salata od slanutka",
                description: "Vegetarijanska i zasitna.",
                ingredients: &[("Slanutak", 240.0, "g"), ("Rajčica", 2.0, "kom"), ("Luk", 1.0, "kom")],
                steps: &["Isperi slanutak", "Nareži povrće", "Sve pomiješaj i začini"],
            },
            DemoRecipe {
                title: "Palačinke s orasima",
                description: "Slastica za vikend.",
                ingredients: &[
                    ("Brašno", 200.0, "g"),
                    ("Mlijeko", 300.0, "ml"),
                    ("Jaja", 2.0, "kom"),
                    ("Orah", 80.0, "g"),
                ],
                steps: &["Umuti smjesu", "Ispeci palačinke", "Nadjev: mljeveni orah"],
            },
        ],
    },
];

/// Seed demo users and recipes, skipping users that already exist
pub async fn run(config: ServerConfig, password: &str) -> AppResult<()> {
    let resources = ServerResources::from_config(config).await?;
    let mut created_users = 0_usize;
    let mut created_recipes = 0_usize;

    for demo in DEMO_USERS {
        if resources.accounts.find_user(demo.username).await?.is_some() {
            warn!("User '{}' already exists, skipping their recipes", demo.username);
            continue;
        }

        let session = resources
            .accounts
            .register(&RegisterRequest {
                username: demo.username.to_owned(),
                password: password.to_owned(),
                display_name: Some(demo.display_name.to_owned()),
                bio: Some(demo.bio.to_owned()),
            })
            .await?;
        created_users += 1;
        println!("User {} ({})", session.user.username, session.user.display_name);

        for recipe in demo.recipes {
            let request = CreateRecipeRequest {
                title: recipe.title.to_owned(),
                description: Some(recipe.description.to_owned()),
                ingredients: recipe
                    .ingredients
                    .iter()
                    .map(|(name, quantity, unit)| IngredientInput::with_amount(*name, *quantity, *unit))
                    .collect(),
                steps: recipe.steps.iter().map(|step| (*step).to_owned()).collect(),
            };
            let created = resources.recipes.create(session.user.id, &request).await?;
            created_recipes += 1;

            let allergens = if created.allergens.is_empty() {
                "-".to_owned()
            } else {
                created.allergens.join(", ")
            };
            println!(
                "   {}  keys: [{}]  allergens: {allergens}",
                created.title,
                created.ingredient_keys.join(", ")
            );
        }
    }

    info!(
        users = created_users,
        recipes = created_recipes,
        "Demo data seeded"
    );
    println!("\nSeeded {created_users} users and {created_recipes} recipes");
    Ok(())
}
