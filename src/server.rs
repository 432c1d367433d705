// ABOUTME: Server resources shared by route handlers and the HTTP server lifecycle
// ABOUTME: Wires configuration into the URL builder, connection store, and exchange step
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! Server resources and lifecycle

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::config::environment::ServerConfig;
use crate::database::{ConnectionStore, Database};
use crate::errors::{AppError, AppResult};
use crate::oauth::{AuthorizationUrlBuilder, CodeExchange, FunctionCodeExchange, UnconfiguredExchange};
use crate::routes;
use crate::services::ConnectionResolver;

/// Shared state handed to every route
pub struct ServerResources {
    /// Authorize URL builder for enabled platforms
    pub authorize: AuthorizationUrlBuilder,
    /// Connection resolver over the connection store
    pub resolver: ConnectionResolver,
    /// Code exchange step used by callback routes
    pub exchange: Arc<dyn CodeExchange>,
}

impl ServerResources {
    /// Assemble resources from already-built parts
    #[must_use]
    pub fn new(
        authorize: AuthorizationUrlBuilder,
        store: Arc<dyn ConnectionStore>,
        exchange: Arc<dyn CodeExchange>,
    ) -> Self {
        Self {
            authorize,
            resolver: ConnectionResolver::new(store),
            exchange,
        }
    }

    /// Build resources from configuration, opening the connection store
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the exchange client fails to build
    pub async fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database_url).await?;
        info!("Connection store initialized");

        let exchange: Arc<dyn CodeExchange> = match &config.exchange_function_url {
            Some(url) => Arc::new(FunctionCodeExchange::new(url.clone())?),
            None => {
                warn!("EXCHANGE_FUNCTION_URL is not set; OAuth callbacks will report a failed exchange");
                Arc::new(UnconfiguredExchange)
            }
        };

        Ok(Self::new(
            AuthorizationUrlBuilder::from_config(&config.public_origin, &config.oauth),
            Arc::new(database),
            exchange,
        ))
    }
}

/// Bind the listener and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if binding fails or the server stops unexpectedly
pub async fn run(config: &ServerConfig, resources: Arc<ServerResources>) -> AppResult<()> {
    let app = routes::router(resources);

    let address = format!("{}:{}", config.host, config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {address}: {e}")))?;

    info!("Server listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C signal"),
        () = terminate => info!("Received terminate signal"),
    }
}
