// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory stores, test OAuth configuration, and a recording exchange
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `alchemylab_connect`

use std::sync::{Arc, Mutex, Once};

use alchemylab_connect::{
    callback::CallbackFailure,
    config::oauth::OAuthConfig,
    database::Database,
    models::{OrganizationId, Platform, PlatformConnection},
    oauth::{AuthorizationUrlBuilder, CodeExchange, ExchangeRequest},
    server::ServerResources,
};
use anyhow::Result;
use async_trait::async_trait;
use url::Url;

static INIT_LOGGER: Once = Once::new();

pub const TEST_ORIGIN: &str = "https://app.alchemylab.test";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard in-memory connection store
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(Arc::new(database))
}

/// Store a connection and return it
pub async fn seed_connection(
    database: &Database,
    organization_id: OrganizationId,
    platform: Platform,
    token: &str,
) -> Result<PlatformConnection> {
    let connection = PlatformConnection::new(organization_id, platform, token)
        .with_refresh_token(format!("{token}-refresh"))
        .with_account_id("act_1001");
    database.upsert_platform_connection(&connection).await?;
    Ok(connection)
}

pub fn test_origin() -> Url {
    Url::parse(TEST_ORIGIN).unwrap()
}

/// OAuth configuration with every ad platform enabled
pub fn test_oauth_config() -> OAuthConfig {
    Platform::oauth_platforms().fold(OAuthConfig::default(), |config, platform| {
        config.with_client(platform, format!("{platform}-client-id"))
    })
}

pub fn test_url_builder() -> AuthorizationUrlBuilder {
    AuthorizationUrlBuilder::from_config(&test_origin(), &test_oauth_config())
}

/// Exchange step that records requests and returns a fixed outcome
pub struct RecordingExchange {
    outcome: Result<(), CallbackFailure>,
    requests: Mutex<Vec<ExchangeRequest>>,
}

impl RecordingExchange {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(failure: CallbackFailure) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(failure),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ExchangeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CodeExchange for RecordingExchange {
    async fn exchange(&self, request: &ExchangeRequest) -> Result<(), CallbackFailure> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }
}

/// Server resources over an in-memory store
pub async fn create_test_resources(
    exchange: Arc<RecordingExchange>,
) -> Result<(Arc<ServerResources>, Arc<Database>)> {
    let database = create_test_database().await?;
    let resources = ServerResources::new(test_url_builder(), database.clone(), exchange);
    Ok((Arc::new(resources), database))
}
