// ABOUTME: Server binary for the FitControl fitness tracking backend
// ABOUTME: Loads configuration, opens the record store, and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! # `FitControl` Server Binary

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use fitcontrol_server::{
    config::{DatabaseUrl, ServerConfig},
    database_plugins::{DatabaseProvider, SqliteDatabase},
    logging,
    server::{self, ServerResources},
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitcontrol-server")]
#[command(about = "FitControl - routine, diet, and adherence tracking API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:<path>` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }
    config.validate()?;

    logging::init_from_env()?;
    info!("{}", config.summary());

    let database =
        SqliteDatabase::new(&config.database.url, config.database.max_connections).await?;
    if config.database.auto_migrate {
        database.migrate().await?;
        info!("Database migrations applied");
    }

    let resources = Arc::new(ServerResources::new(Arc::new(database), Arc::new(config))?);

    if let Err(e) = server::run(resources).await {
        error!(error = %e, "Server error");
        return Err(e);
    }
    Ok(())
}
