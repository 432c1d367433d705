// ABOUTME: Platform connection record and the credentials view derived from it
// ABOUTME: One authoritative row per (organization, platform); credentials live only in memory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{OrganizationId, Platform};

/// Stored link between an organization and a platform
///
/// Rows are written by the code-exchange step; this service only reads them.
/// The store enforces at most one row per `(organization_id, platform)`.
#[derive(Clone, Serialize, Deserialize)]
pub struct PlatformConnection {
    /// Unique identifier for this connection record
    pub id: String,
    /// Owning organization
    pub organization_id: OrganizationId,
    /// Connected platform
    pub platform: Platform,
    /// OAuth access token
    pub auth_token: String,
    /// OAuth refresh token, when the provider issued one
    pub refresh_token: Option<String>,
    /// Access token expiry
    pub token_expiry: Option<DateTime<Utc>>,
    /// Provider-side ad account identifier
    pub account_id: Option<String>,
    /// Whether the connection is currently active
    pub connected: bool,
    /// When the connection was first stored
    pub created_at: DateTime<Utc>,
    /// When the connection was last written
    pub updated_at: DateTime<Utc>,
}

impl PlatformConnection {
    /// Create a new connected record with a fresh id
    #[must_use]
    pub fn new(
        organization_id: OrganizationId,
        platform: Platform,
        auth_token: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            organization_id,
            platform,
            auth_token: auth_token.into(),
            refresh_token: None,
            token_expiry: None,
            account_id: None,
            connected: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a refresh token
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Attach a token expiry
    #[must_use]
    pub const fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.token_expiry = Some(expires_at);
        self
    }

    /// Attach a provider account id
    #[must_use]
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Project this record into an in-memory credentials value
    #[must_use]
    pub fn credentials(&self) -> PlatformCredentials {
        PlatformCredentials::from(self)
    }
}

// Tokens stay out of Debug output so they never reach the logs.
impl fmt::Debug for PlatformConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConnection")
            .field("id", &self.id)
            .field("organization_id", &self.organization_id)
            .field("platform", &self.platform)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("token_expiry", &self.token_expiry)
            .field("account_id", &self.account_id)
            .field("connected", &self.connected)
            .finish_non_exhaustive()
    }
}

/// Credentials derived from a [`PlatformConnection`]
///
/// Lives only for the duration of a single lookup.
#[derive(Clone, PartialEq, Eq)]
pub struct PlatformCredentials {
    /// OAuth access token
    pub access_token: String,
    /// OAuth refresh token
    pub refresh_token: Option<String>,
    /// Access token expiry
    pub expires_at: Option<DateTime<Utc>>,
    /// Provider-side account identifier
    pub account_id: Option<String>,
}

impl PlatformCredentials {
    /// Create credentials holding only an access token
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
            account_id: None,
        }
    }

    /// Whether the access token has expired at `now`
    ///
    /// Tokens without an expiry never report as expired.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

impl From<&PlatformConnection> for PlatformCredentials {
    fn from(connection: &PlatformConnection) -> Self {
        Self {
            access_token: connection.auth_token.clone(),
            refresh_token: connection.refresh_token.clone(),
            expires_at: connection.token_expiry,
            account_id: connection.account_id.clone(),
        }
    }
}

impl fmt::Debug for PlatformCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformCredentials")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_at", &self.expires_at)
            .field("account_id", &self.account_id)
            .finish()
    }
}
