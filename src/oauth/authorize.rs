// ABOUTME: Authorize URL builder for ad-platform OAuth flows
// ABOUTME: Maps each platform to its endpoint, scopes, callback path, and extra parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

use std::collections::BTreeMap;

use url::Url;

use super::{AuthorizationRequest, OAuthError};
use crate::config::oauth::OAuthConfig;
use crate::constants::oauth::{
    FACEBOOK_AUTH_URL, FACEBOOK_SCOPES, GOOGLE_AUTH_URL, GOOGLE_SCOPES, LINKEDIN_AUTH_URL,
    LINKEDIN_SCOPES, PINTEREST_AUTH_URL, PINTEREST_SCOPES, SERVER_CALLBACK_PREFIX,
    SHARED_CALLBACK_PATH, TIKTOK_AUTH_URL, TIKTOK_SCOPES,
};
use crate::models::Platform;

/// Static authorize-endpoint description for one provider
struct ProviderProfile {
    auth_url: &'static str,
    scopes: &'static [&'static str],
    scope_separator: &'static str,
    extra_params: &'static [(&'static str, &'static str)],
}

const RESPONSE_CODE: &[(&str, &str)] = &[("response_type", "code")];

const fn profile(platform: Platform) -> Option<ProviderProfile> {
    let profile = match platform {
        Platform::Facebook => ProviderProfile {
            auth_url: FACEBOOK_AUTH_URL,
            scopes: FACEBOOK_SCOPES,
            scope_separator: ",",
            extra_params: RESPONSE_CODE,
        },
        Platform::Google => ProviderProfile {
            auth_url: GOOGLE_AUTH_URL,
            scopes: GOOGLE_SCOPES,
            scope_separator: " ",
            // Offline access plus forced consent so Google returns a refresh token
            extra_params: &[
                ("response_type", "code"),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        },
        Platform::LinkedIn => ProviderProfile {
            auth_url: LINKEDIN_AUTH_URL,
            scopes: LINKEDIN_SCOPES,
            scope_separator: " ",
            extra_params: RESPONSE_CODE,
        },
        Platform::TikTok => ProviderProfile {
            auth_url: TIKTOK_AUTH_URL,
            scopes: TIKTOK_SCOPES,
            scope_separator: ",",
            extra_params: &[],
        },
        Platform::Pinterest => ProviderProfile {
            auth_url: PINTEREST_AUTH_URL,
            scopes: PINTEREST_SCOPES,
            scope_separator: ",",
            extra_params: RESPONSE_CODE,
        },
        Platform::Mixpanel | Platform::Amplitude | Platform::OpenAi => return None,
    };
    Some(profile)
}

/// Callback path the provider redirects back to
///
/// Facebook returns to the dedicated server route; every other provider
/// shares the browser callback page.
#[must_use]
pub fn callback_path(platform: Platform) -> String {
    match platform {
        Platform::Facebook => format!("{SERVER_CALLBACK_PREFIX}/{platform}"),
        _ => SHARED_CALLBACK_PATH.to_owned(),
    }
}

/// Builds provider authorize URLs from the public origin and configured client ids
///
/// Only builds URLs; navigation is left to the caller.
#[derive(Debug, Clone)]
pub struct AuthorizationUrlBuilder {
    origin: String,
    clients: BTreeMap<Platform, String>,
}

impl AuthorizationUrlBuilder {
    /// Create a builder with no configured clients
    #[must_use]
    pub fn new(public_origin: &Url) -> Self {
        Self {
            origin: public_origin.as_str().trim_end_matches('/').to_owned(),
            clients: BTreeMap::new(),
        }
    }

    /// Create a builder for every enabled platform in `config`
    #[must_use]
    pub fn from_config(public_origin: &Url, config: &OAuthConfig) -> Self {
        let clients = config
            .enabled_platforms()
            .into_iter()
            .filter_map(|platform| {
                config
                    .client_id(platform)
                    .map(|client_id| (platform, client_id.to_owned()))
            })
            .collect();

        Self {
            clients,
            ..Self::new(public_origin)
        }
    }

    /// Register a client id for one platform
    #[must_use]
    pub fn with_client(mut self, platform: Platform, client_id: impl Into<String>) -> Self {
        self.clients.insert(platform, client_id.into());
        self
    }

    /// Redirect URI registered for `platform`
    #[must_use]
    pub fn redirect_uri(&self, platform: Platform) -> String {
        format!("{}{}", self.origin, callback_path(platform))
    }

    /// Build the authorize request for `platform`
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedPlatform` for platforms without an OAuth flow and
    /// `PlatformNotConfigured` when no client id is registered.
    pub fn build(&self, platform: Platform) -> Result<AuthorizationRequest, OAuthError> {
        let profile = profile(platform).ok_or(OAuthError::UnsupportedPlatform(platform))?;
        let client_id = self
            .clients
            .get(&platform)
            .ok_or(OAuthError::PlatformNotConfigured(platform))?;

        let redirect_uri = self.redirect_uri(platform);
        Url::parse(&redirect_uri).map_err(|e| OAuthError::InvalidRedirectUri(e.to_string()))?;

        let state = platform.as_str().to_owned();
        let mut url = Url::parse(profile.auth_url)
            .map_err(|e| OAuthError::InvalidRedirectUri(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", &redirect_uri)
            .append_pair("scope", &profile.scopes.join(profile.scope_separator))
            .append_pair("state", &state)
            .extend_pairs(profile.extra_params.iter().copied());

        Ok(AuthorizationRequest {
            platform,
            url,
            redirect_uri,
            state,
            scopes: profile.scopes.iter().map(|s| (*s).to_owned()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_facebook_uses_server_callback() {
        assert_eq!(callback_path(Platform::Facebook), "/api/auth/callback/facebook");
        for platform in [Platform::Google, Platform::LinkedIn, Platform::TikTok, Platform::Pinterest] {
            assert_eq!(callback_path(platform), "/oauth/callback");
        }
    }

    #[test]
    fn test_every_oauth_platform_has_profile() {
        for platform in Platform::ALL {
            assert_eq!(profile(platform).is_some(), platform.supports_oauth());
        }
    }
}
