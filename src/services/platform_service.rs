// ABOUTME: Platform service handle pairing a platform with optional stored credentials
// ABOUTME: Disconnected handles can still start a fresh OAuth flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

use chrono::Utc;
use serde::Serialize;

use crate::models::{Platform, PlatformCredentials};
use crate::oauth::{AuthorizationRequest, AuthorizationUrlBuilder, OAuthError};

/// Handle for talking to one platform on behalf of an organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformService {
    platform: Platform,
    credentials: Option<PlatformCredentials>,
}

impl PlatformService {
    /// Handle with no credentials
    #[must_use]
    pub const fn disconnected(platform: Platform) -> Self {
        Self {
            platform,
            credentials: None,
        }
    }

    /// Handle authenticated with `credentials`
    #[must_use]
    pub const fn authenticated(platform: Platform, credentials: PlatformCredentials) -> Self {
        Self {
            platform,
            credentials: Some(credentials),
        }
    }

    /// Platform this handle talks to
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Stored credentials, if connected
    #[must_use]
    pub const fn credentials(&self) -> Option<&PlatformCredentials> {
        self.credentials.as_ref()
    }

    /// Whether credentials are present
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.credentials.is_some()
    }

    /// Whether the stored access token has expired
    #[must_use]
    pub fn needs_reauthorization(&self) -> bool {
        match &self.credentials {
            Some(credentials) => credentials.is_expired(Utc::now()),
            None => true,
        }
    }

    /// Authorize request for starting a fresh connection flow
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no OAuth flow or is not configured
    pub fn authorization_request(
        &self,
        builder: &AuthorizationUrlBuilder,
    ) -> Result<AuthorizationRequest, OAuthError> {
        builder.build(self.platform)
    }

    /// Summary safe to serialize; tokens are never included
    #[must_use]
    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary {
            platform: self.platform,
            connected: self.is_connected(),
            needs_reauthorization: self.needs_reauthorization(),
            credentials: self.credentials.as_ref().map(|c| CredentialsSummary {
                has_refresh_token: c.refresh_token.is_some(),
                expires_at: c.expires_at,
                account_id: c.account_id.clone(),
            }),
        }
    }
}

/// Serializable view of a [`PlatformService`]
#[derive(Debug, Clone, Serialize)]
pub struct ServiceSummary {
    /// Platform identifier
    pub platform: Platform,
    /// Whether credentials are present
    pub connected: bool,
    /// No credentials, or the access token has expired
    pub needs_reauthorization: bool,
    /// Credential metadata
    pub credentials: Option<CredentialsSummary>,
}

/// Credential metadata without token values
#[derive(Debug, Clone, Serialize)]
pub struct CredentialsSummary {
    /// Whether a refresh token is stored
    pub has_refresh_token: bool,
    /// Access token expiry
    pub expires_at: Option<chrono::DateTime<Utc>>,
    /// Provider-side account id
    pub account_id: Option<String>,
}
