// ABOUTME: Server binary: loads configuration, opens storage and serves the recipe HTTP API
// ABOUTME: Stops gracefully on Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! # Recepti Server Binary
//!
//! Starts the recipe sharing API with account authentication, SQLite storage
//! and ingredient matching.

use anyhow::Result;
use clap::Parser;
use recepti_server::{
    config::ServerConfig, constants::service_names::RECEPTI_SERVER, logging::LoggingConfig,
    resources::ServerResources, server,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recepti-server")]
#[command(about = "Recepti - recipe sharing API with ingredient and pantry matching")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Ingredient catalog (YAML) with synonyms and allergen rules
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    LoggingConfig::for_service(RECEPTI_SERVER).init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if args.catalog.is_some() {
        config.catalog_path = args.catalog;
    }
    config.validate()?;

    info!("Starting Recepti server");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config).await?);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
