// ABOUTME: Server binary for the AlchemyLab ad-platform connection service
// ABOUTME: Loads configuration, initializes logging and storage, and serves the HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! # AlchemyLab Connect Server Binary
//!
//! Starts the HTTP server that redirects users to ad-platform OAuth screens,
//! completes their callbacks, and reports stored connection status.

use std::sync::Arc;

use alchemylab_connect::{
    config::environment::ServerConfig,
    logging,
    server::{self, ServerResources},
};
use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "alchemylab-server")]
#[command(about = "AlchemyLab Connect - OAuth connection service for ad platforms")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,

    /// Override connection store URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Before config loading so validation diagnostics are emitted
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    info!("Starting AlchemyLab Connect");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(&config).await?);

    display_available_endpoints(&config);

    if let Err(e) = server::run(&config, resources).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Display all available endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.host;
    let port = config.http_port;

    info!("=== Available Endpoints ===");
    info!("OAuth:");
    info!("   Authorize:         GET  http://{host}:{port}/oauth/authorize/{{platform}}");
    info!("   Callback:          GET  http://{host}:{port}/oauth/callback");
    info!("   Server Callback:   GET  http://{host}:{port}/api/auth/callback/{{platform}}");
    info!("Connections:");
    info!("   Lookup:            GET  http://{host}:{port}/api/connections/{{platform}}");
    info!("Health:");
    info!("   Health:            GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
    info!("=== End of Endpoint List ===");
}
