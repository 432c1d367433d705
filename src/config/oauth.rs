// ABOUTME: OAuth configuration types for ad-platform authorization flows
// ABOUTME: Loads per-platform client ids from the environment and fails fast on gaps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

use std::collections::{BTreeMap, BTreeSet};
use std::env;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::env_config;
use crate::errors::{AppError, AppResult};
use crate::models::Platform;

/// OAuth client configuration for a single platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformOAuthConfig {
    /// OAuth client identifier issued by the provider
    pub client_id: Option<String>,
    /// Whether this platform may start OAuth flows
    pub enabled: bool,
}

/// OAuth configuration for every platform the deployment knows about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Per-platform settings
    pub platforms: BTreeMap<Platform, PlatformOAuthConfig>,
}

impl OAuthConfig {
    /// Load OAuth configuration from process environment
    ///
    /// # Errors
    ///
    /// Returns an error if `ENABLED_PLATFORMS` names an unknown platform
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load OAuth configuration through an arbitrary key lookup
    ///
    /// Without `ENABLED_PLATFORMS`, every OAuth platform with a client id is enabled.
    /// With it, exactly the listed platforms are enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if `ENABLED_PLATFORMS` names an unknown platform
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let explicit = lookup(env_config::ENABLED_PLATFORMS)
            .map(|raw| parse_platform_list(&raw))
            .transpose()?;

        let mut platforms = BTreeMap::new();
        for platform in Platform::oauth_platforms() {
            let client_id = lookup(&client_id_key(platform))
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty());
            let enabled = explicit
                .as_ref()
                .map_or(client_id.is_some(), |set| set.contains(&platform));
            platforms.insert(platform, PlatformOAuthConfig { client_id, enabled });
        }

        // Keep listed non-OAuth platforms so validation can reject them
        if let Some(set) = &explicit {
            for platform in set.iter().filter(|p| !p.supports_oauth()) {
                platforms.insert(
                    *platform,
                    PlatformOAuthConfig {
                        client_id: None,
                        enabled: true,
                    },
                );
            }
        }

        Ok(Self { platforms })
    }

    /// Enable a platform with the given client id
    #[must_use]
    pub fn with_client(mut self, platform: Platform, client_id: impl Into<String>) -> Self {
        self.platforms.insert(
            platform,
            PlatformOAuthConfig {
                client_id: Some(client_id.into()),
                enabled: true,
            },
        );
        self
    }

    /// Validate that every enabled platform can build an authorize URL
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a platform without an OAuth mapping is enabled,
    /// and `ConfigMissing` when an enabled platform has no client id.
    pub fn validate(&self) -> AppResult<()> {
        for (platform, settings) in self.platforms.iter().filter(|(_, s)| s.enabled) {
            if !platform.supports_oauth() {
                warn!(oauth.platform = %platform, "Enabled platform has no OAuth flow");
                return Err(AppError::config_invalid(format!(
                    "{platform} does not support OAuth and cannot be enabled"
                )));
            }

            if settings.client_id.is_none() {
                warn!(oauth.platform = %platform, "Enabled platform is missing its client id");
                return Err(AppError::config_missing(format!(
                    "{} must be set when {platform} is enabled",
                    client_id_key(*platform)
                )));
            }

            info!(oauth.platform = %platform, "OAuth platform enabled");
        }
        Ok(())
    }

    /// Client id for an enabled platform
    #[must_use]
    pub fn client_id(&self, platform: Platform) -> Option<&str> {
        self.platforms
            .get(&platform)
            .filter(|settings| settings.enabled)
            .and_then(|settings| settings.client_id.as_deref())
    }

    /// Platforms allowed to start OAuth flows
    #[must_use]
    pub fn enabled_platforms(&self) -> Vec<Platform> {
        self.platforms
            .iter()
            .filter(|(_, settings)| settings.enabled)
            .map(|(platform, _)| *platform)
            .collect()
    }
}

/// Environment variable holding a platform's client id (`FACEBOOK_CLIENT_ID`, ...)
#[must_use]
pub fn client_id_key(platform: Platform) -> String {
    format!(
        "{}{}",
        platform.as_str().to_ascii_uppercase(),
        env_config::CLIENT_ID_SUFFIX
    )
}

fn parse_platform_list(raw: &str) -> AppResult<BTreeSet<Platform>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<Platform>().map_err(|_| {
                AppError::config_invalid(format!(
                    "{} contains unknown platform '{item}'",
                    env_config::ENABLED_PLATFORMS
                ))
            })
        })
        .collect()
}
