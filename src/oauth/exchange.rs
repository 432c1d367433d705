// ABOUTME: Authorization code exchange seam between the callback route and the token backend
// ABOUTME: Forwards codes to the backend function and maps its failures to tagged kinds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::callback::{CallbackFailure, FailureKind};
use crate::errors::{AppError, AppResult};
use crate::models::Platform;

/// Timeout applied to the backend exchange call
const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the token backend needs to complete a connection
#[derive(Clone, Serialize)]
pub struct ExchangeRequest {
    /// Platform named by the redirect `state`
    pub platform: Platform,
    /// Authorization code from the provider
    pub code: String,
    /// Raw `state` value
    pub state: String,
    /// Redirect URI used when authorizing; providers require it to match
    pub redirect_uri: String,
    /// Caller session as an `Authorization` value, forwarded to the backend
    #[serde(skip)]
    pub authorization: Option<String>,
}

impl std::fmt::Debug for ExchangeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeRequest")
            .field("platform", &self.platform)
            .field("state", &self.state)
            .field("redirect_uri", &self.redirect_uri)
            .field("has_authorization", &self.authorization.is_some())
            .finish_non_exhaustive()
    }
}

/// Exchanges an authorization code for stored credentials
#[async_trait]
pub trait CodeExchange: Send + Sync {
    /// Complete the connection for `request`
    async fn exchange(&self, request: &ExchangeRequest) -> Result<(), CallbackFailure>;
}

/// Error body returned by the backend function
#[derive(Debug, Deserialize)]
struct ExchangeErrorBody {
    error: String,
    #[serde(default)]
    kind: Option<FailureKind>,
}

/// Exchange step backed by an HTTP function that stores the tokens
pub struct FunctionCodeExchange {
    endpoint: Url,
    client: reqwest::Client,
}

impl FunctionCodeExchange {
    /// Create an exchange client for `endpoint`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(endpoint: Url) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(EXCHANGE_TIMEOUT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { endpoint, client })
    }

    /// Backend function URL
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CodeExchange for FunctionCodeExchange {
    async fn exchange(&self, request: &ExchangeRequest) -> Result<(), CallbackFailure> {
        let Some(authorization) = request.authorization.as_deref() else {
            return Err(CallbackFailure::not_authenticated());
        };

        debug!(oauth.platform = %request.platform, "Forwarding authorization code to exchange function");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(oauth.platform = %request.platform, error = %e, "Exchange function unreachable");
                CallbackFailure::new(
                    FailureKind::ExchangeFailed,
                    format!("Failed to complete {} connection", request.platform.display_name()),
                )
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(CallbackFailure::not_authenticated());
        }

        let body = response.text().await.unwrap_or_default();
        Err(failure_from_body(status, &body))
    }
}

fn failure_from_body(status: StatusCode, body: &str) -> CallbackFailure {
    match serde_json::from_str::<ExchangeErrorBody>(body) {
        Ok(ExchangeErrorBody {
            error,
            kind: Some(kind),
        }) => CallbackFailure::new(kind, error),
        Ok(ExchangeErrorBody { error, kind: None }) => CallbackFailure::from_message(error),
        Err(_) => CallbackFailure::new(
            FailureKind::ExchangeFailed,
            format!("Exchange function returned {status}"),
        ),
    }
}

/// Exchange step used when no backend function is configured
pub struct UnconfiguredExchange;

#[async_trait]
impl CodeExchange for UnconfiguredExchange {
    async fn exchange(&self, _request: &ExchangeRequest) -> Result<(), CallbackFailure> {
        Err(CallbackFailure::new(
            FailureKind::ExchangeFailed,
            "Code exchange is not configured",
        ))
    }
}
