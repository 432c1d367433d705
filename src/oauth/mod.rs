// ABOUTME: OAuth module organizing authorize URL building, redirect parsing, and code exchange
// ABOUTME: Centralizes ad-platform OAuth flows behind typed errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! # OAuth Module
//!
//! Builds provider authorize URLs, parses the redirect that comes back, and
//! hands the authorization code to the exchange step.

/// Authorize URL construction per platform
pub mod authorize;
/// Authorization code exchange seam
pub mod exchange;
/// Redirect query parsing
pub mod redirect;

pub use authorize::{callback_path, AuthorizationUrlBuilder};
pub use exchange::{CodeExchange, ExchangeRequest, FunctionCodeExchange, UnconfiguredExchange};
pub use redirect::OAuthRedirect;

use serde::Serialize;
use url::Url;

use crate::errors::{AppError, ErrorCode};
use crate::models::Platform;

/// OAuth error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OAuthError {
    /// Platform has no OAuth authorize flow
    #[error("Platform does not support OAuth: {0}")]
    UnsupportedPlatform(Platform),

    /// Platform supports OAuth but is disabled or lacks a client id
    #[error("OAuth is not configured for {0}")]
    PlatformNotConfigured(Platform),

    /// Public origin plus callback path did not form a valid URL
    #[error("Invalid redirect URI: {0}")]
    InvalidRedirectUri(String),
}

impl From<OAuthError> for AppError {
    fn from(error: OAuthError) -> Self {
        let code = match &error {
            OAuthError::UnsupportedPlatform(_) => ErrorCode::UnsupportedPlatform,
            OAuthError::PlatformNotConfigured(_) => ErrorCode::ResourceUnavailable,
            OAuthError::InvalidRedirectUri(_) => ErrorCode::ConfigInvalid,
        };
        let resource_id = match &error {
            OAuthError::UnsupportedPlatform(platform)
            | OAuthError::PlatformNotConfigured(platform) => Some(platform.as_str()),
            OAuthError::InvalidRedirectUri(_) => None,
        };

        let app_error = Self::new(code, error.to_string());
        match resource_id {
            Some(id) => app_error.with_resource_id(id).with_source(error),
            None => app_error.with_source(error),
        }
    }
}

/// A fully built authorize request for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationRequest {
    /// Target platform
    pub platform: Platform,
    /// Provider authorize URL the browser should be sent to
    pub url: Url,
    /// Callback URL registered with the provider
    pub redirect_uri: String,
    /// Opaque state echoed back by the provider (the platform identifier)
    pub state: String,
    /// Requested scopes
    pub scopes: Vec<String>,
}

impl AuthorizationRequest {
    /// Authorize URL as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}
