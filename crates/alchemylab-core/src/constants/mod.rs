// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Provider endpoints, scopes, callback paths, ports, and environment keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat file.

/// OAuth provider endpoints, scopes, and callback paths
pub mod oauth;

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "127.0.0.1";
}

/// Service identity for structured logging
pub mod service_names {
    /// Service name reported in logs
    pub const ALCHEMYLAB_CONNECT: &str = "alchemylab-connect";
}

/// Environment variable names read by configuration loaders
pub mod env_config {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// HTTP bind address
    pub const HOST: &str = "HOST";
    /// Origin the browser sees; redirect URIs are built from it
    pub const PUBLIC_ORIGIN: &str = "PUBLIC_ORIGIN";
    /// Connection store URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Backend function that exchanges authorization codes for tokens
    pub const EXCHANGE_FUNCTION_URL: &str = "EXCHANGE_FUNCTION_URL";
    /// Comma-separated platform identifiers allowed to start OAuth flows
    pub const ENABLED_PLATFORMS: &str = "ENABLED_PLATFORMS";
    /// Suffix appended to the upper-cased platform name to find its client id
    pub const CLIENT_ID_SUFFIX: &str = "_CLIENT_ID";

    /// Default public origin for local development
    pub const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:8080";
    /// Default `SQLite` database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/alchemylab.db";
}

/// HTTP header names used by the service
pub mod headers {
    /// Header carrying the caller's organization id
    pub const ORGANIZATION_ID: &str = "x-organization-id";
    /// Cookie carrying the browser session token
    pub const AUTH_TOKEN_COOKIE: &str = "auth_token";
}
