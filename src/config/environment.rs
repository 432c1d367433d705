// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads listen address, public origin, database, and exchange endpoint from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! Environment-based configuration for production deployment

use std::env;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use url::Url;

use super::oauth::OAuthConfig;
use crate::constants::{env_config, ports};
use crate::errors::{AppError, AppResult};

/// Server configuration loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// HTTP bind address
    pub host: String,
    /// Origin the browser sees; OAuth redirect URIs are derived from it
    pub public_origin: Url,
    /// Connection store URL
    pub database_url: String,
    /// Backend function that exchanges authorization codes for tokens
    pub exchange_function_url: Option<Url>,
    /// Per-platform OAuth client configuration
    pub oauth: OAuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or OAuth validation fails
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var(env_config::HTTP_PORT) {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|e| {
                AppError::config_invalid(format!("{} must be a port number: {e}", env_config::HTTP_PORT))
            })?,
            Err(_) => ports::DEFAULT_HTTP_PORT,
        };

        let host = env::var(env_config::HOST).unwrap_or_else(|_| ports::DEFAULT_HOST.to_owned());

        let public_origin = parse_url(
            env_config::PUBLIC_ORIGIN,
            &env::var(env_config::PUBLIC_ORIGIN)
                .unwrap_or_else(|_| env_config::DEFAULT_PUBLIC_ORIGIN.to_owned()),
        )?;

        let database_url = env::var(env_config::DATABASE_URL)
            .unwrap_or_else(|_| env_config::DEFAULT_DATABASE_URL.to_owned());

        let exchange_function_url = env::var(env_config::EXCHANGE_FUNCTION_URL)
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_url(env_config::EXCHANGE_FUNCTION_URL, &raw))
            .transpose()?;

        let oauth = OAuthConfig::from_env()?;
        oauth.validate()?;

        Ok(Self {
            http_port,
            host,
            public_origin,
            database_url,
            exchange_function_url,
            oauth,
        })
    }

    /// Configuration summary safe for logging
    #[must_use]
    pub fn summary(&self) -> String {
        let enabled = self
            .oauth
            .enabled_platforms()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        let mut summary = String::from("AlchemyLab Connect Configuration:\n");
        let _ = writeln!(summary, "  - HTTP: {}:{}", self.host, self.http_port);
        let _ = writeln!(summary, "  - Public origin: {}", self.public_origin);
        let _ = writeln!(summary, "  - Database: {}", redact_database_url(&self.database_url));
        let _ = writeln!(
            summary,
            "  - Code exchange: {}",
            self.exchange_function_url
                .as_ref()
                .map_or("not configured", Url::as_str)
        );
        let _ = write!(
            summary,
            "  - OAuth platforms: {}",
            if enabled.is_empty() {
                "none".to_owned()
            } else {
                enabled.join(", ")
            }
        );
        summary
    }
}

fn parse_url(key: &str, raw: &str) -> AppResult<Url> {
    Url::parse(raw.trim())
        .map_err(|e| AppError::config_invalid(format!("{key} is not a valid URL: {e}")))
}

// Connection strings may embed credentials; only the scheme survives
fn redact_database_url(url: &str) -> String {
    url.split_once(':').map_or_else(
        || "<unparsed>".to_owned(),
        |(scheme, rest)| {
            if rest.contains('@') {
                format!("{scheme}://<redacted>")
            } else {
                url.to_owned()
            }
        },
    )
}
