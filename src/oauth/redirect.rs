// ABOUTME: OAuth redirect query parsing for provider callbacks
// ABOUTME: Extracts code, state, and error from the query string the provider sends back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

use crate::models::Platform;

/// Parameters a provider appends when redirecting back after authorization
///
/// Missing `code` and `state` are empty strings; parsing never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthRedirect {
    /// Authorization code to exchange
    pub code: String,
    /// State echoed back by the provider
    pub state: String,
    /// Provider error code (`access_denied`, ...)
    pub error: Option<String>,
    /// Provider error description, when sent
    pub error_description: Option<String>,
}

impl OAuthRedirect {
    /// Parse a raw query string, with or without the leading `?`
    ///
    /// Values are percent-decoded and the first occurrence of a key wins.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut code = None;
        let mut state = None;
        let mut error = None;
        let mut error_description = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "code" => &mut code,
                "state" => &mut state,
                "error" => &mut error,
                "error_description" => &mut error_description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self {
            code: code.unwrap_or_default(),
            state: state.unwrap_or_default(),
            error: error.filter(|value| !value.is_empty()),
            error_description,
        }
    }

    /// Parse the query of a full URL
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or_default())
    }

    /// Parse the query of a request URI
    #[must_use]
    pub fn from_uri(uri: &http::Uri) -> Self {
        Self::from_query(uri.query().unwrap_or_default())
    }

    /// Platform named by `state`, when it is a known identifier
    #[must_use]
    pub fn platform(&self) -> Option<Platform> {
        self.state.parse().ok()
    }

    /// Whether the provider reported an error
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether an authorization code is present
    #[must_use]
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }
}
