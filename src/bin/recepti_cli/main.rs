// ABOUTME: Recepti CLI - command-line tool for ingredient inspection and demo data seeding
// ABOUTME: Normalizes names, classifies allergens and seeds users and recipes through the services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors
//!
//! Usage:
//! ```bash
//! # Show normalized and canonical keys
//! recepti-cli normalize "Paradajz" "Češnjak"
//!
//! # Show keys and detected allergens for a list of ingredients
//! recepti-cli allergens "Brašno" "Mlijeko" "Orasi"
//!
//! # Create demo users and recipes
//! recepti-cli seed --password recepti123
//! ```

mod commands;

use clap::{Parser, Subcommand};
use recepti_server::{
    config::{DatabaseUrl, ServerConfig},
    constants::service_names::RECEPTI_CLI,
    errors::{AppError, AppResult},
    logging::LoggingConfig,
    resources::load_catalog,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "recepti-cli",
    about = "Recepti management CLI",
    long_about = "Command-line tool for inspecting ingredient normalization and allergen detection, and for seeding demo data."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Ingredient catalog (YAML) override
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print the normalized and canonical key of each ingredient name
    Normalize {
        /// Raw ingredient names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print canonical keys and detected allergens for ingredient names
    Allergens {
        /// Raw ingredient names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Create the demo users and recipes
    Seed {
        /// Password given to every demo account
        #[arg(long, default_value = "recepti123")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::for_service(RECEPTI_CLI);
    if cli.verbose {
        logging.level = "debug".to_owned();
    }
    logging
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = cli.database_url {
        config.database.url = DatabaseUrl::parse_url(&url)?;
    }
    if cli.catalog.is_some() {
        config.catalog_path = cli.catalog;
    }

    match cli.command {
        Command::Normalize { names } => {
            let catalog = load_catalog(&config)?;
            commands::ingredients::normalize(&catalog, &names);
        }
        Command::Allergens { names } => {
            let catalog = load_catalog(&config)?;
            commands::ingredients::allergens(&catalog, &names)?;
        }
        Command::Seed { password } => {
            info!("Seeding demo data into {}", config.database.url);
            commands::seed::run(config, &password).await?;
        }
    }

    Ok(())
}
