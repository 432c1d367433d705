// ABOUTME: OAuth route handlers for starting provider authorization and completing callbacks
// ABOUTME: Redirects to provider authorize URLs and renders the callback status page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! OAuth routes
//!
//! `GET /oauth/authorize/:platform` redirects to the provider. Providers send
//! the browser back to either the shared `/oauth/callback` page or the
//! dedicated `/api/auth/callback/:platform` route.

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::callback::{CallbackFailure, CallbackPage, CallbackStatus, FailureKind};
use crate::constants;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::models::Platform;
use crate::oauth::{ExchangeRequest, OAuthRedirect};
use crate::security::cookies::get_cookie_value;
use crate::server::ServerResources;

/// OAuth routes implementation
pub struct OAuthRoutes;

impl OAuthRoutes {
    /// Create all OAuth routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/oauth/authorize/:platform", get(Self::handle_authorize))
            .route("/oauth/callback", get(Self::handle_callback))
            .route("/api/auth/callback/:platform", get(Self::handle_platform_callback))
            .with_state(resources)
    }

    async fn handle_authorize(
        State(resources): State<Arc<ServerResources>>,
        Path(platform): Path<String>,
    ) -> Result<Response, AppError> {
        let platform: Platform = platform.parse()?;

        let request = resources.authorize.build(platform).map_err(|e| {
            AppLogger::log_oauth_event(platform, "authorize", false, Some(&e.to_string()));
            AppError::from(e)
        })?;

        AppLogger::log_oauth_event(platform, "authorize", true, None);
        Ok((StatusCode::FOUND, [(header::LOCATION, request.url.to_string())]).into_response())
    }

    async fn handle_callback(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        RawQuery(query): RawQuery,
    ) -> Response {
        let redirect = OAuthRedirect::from_query(query.as_deref().unwrap_or_default());
        let status = Self::complete(&resources, &headers, &redirect, None).await;
        Self::render(&status)
    }

    async fn handle_platform_callback(
        State(resources): State<Arc<ServerResources>>,
        Path(platform): Path<String>,
        headers: HeaderMap,
        RawQuery(query): RawQuery,
    ) -> Response {
        let redirect = OAuthRedirect::from_query(query.as_deref().unwrap_or_default());
        let status = match platform.parse::<Platform>() {
            Ok(expected) => Self::complete(&resources, &headers, &redirect, Some(expected)).await,
            Err(_) => CallbackStatus::Error(CallbackFailure::new(
                FailureKind::InvalidCallback,
                format!("Unknown callback platform: {platform}"),
            )),
        };
        Self::render(&status)
    }

    /// Turn a provider redirect into a settled callback status
    async fn complete(
        resources: &ServerResources,
        headers: &HeaderMap,
        redirect: &OAuthRedirect,
        expected: Option<Platform>,
    ) -> CallbackStatus {
        let result = Self::exchange(resources, headers, redirect, expected).await;
        if let (Err(failure), Some(platform)) = (&result, redirect.platform()) {
            AppLogger::log_oauth_event(platform, "callback", false, Some(&failure.message));
        } else if let Ok(Some(platform)) = &result {
            AppLogger::log_oauth_event(*platform, "callback", true, None);
        }
        CallbackStatus::from(result)
    }

    async fn exchange(
        resources: &ServerResources,
        headers: &HeaderMap,
        redirect: &OAuthRedirect,
        expected: Option<Platform>,
    ) -> Result<Option<Platform>, CallbackFailure> {
        if let Some(error) = &redirect.error {
            let message = redirect
                .error_description
                .clone()
                .unwrap_or_else(|| format!("Authorization was not granted: {error}"));
            return Err(CallbackFailure::new(FailureKind::AccessDenied, message));
        }

        let Some(platform) = redirect.platform().filter(Platform::supports_oauth) else {
            return Err(CallbackFailure::new(
                FailureKind::InvalidCallback,
                "Invalid OAuth state parameter",
            ));
        };

        if expected.is_some_and(|expected| expected != platform) {
            return Err(CallbackFailure::new(
                FailureKind::InvalidCallback,
                "OAuth state does not match the callback route",
            ));
        }

        if !redirect.has_code() {
            return Err(CallbackFailure::new(
                FailureKind::InvalidCallback,
                "Missing authorization code",
            ));
        }

        let request = ExchangeRequest {
            platform,
            code: redirect.code.clone(),
            state: redirect.state.clone(),
            redirect_uri: resources.authorize.redirect_uri(platform),
            authorization: Self::session_authorization(headers),
        };

        resources.exchange.exchange(&request).await?;
        Ok(Some(platform))
    }

    /// Caller session: the `Authorization` header, else the session cookie as a bearer token
    fn session_authorization(headers: &HeaderMap) -> Option<String> {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty())
            .map(ToOwned::to_owned)
            .or_else(|| {
                get_cookie_value(headers, constants::headers::AUTH_TOKEN_COOKIE)
                    .map(|token| format!("Bearer {token}"))
            })
    }

    fn render(status: &CallbackStatus) -> Response {
        let code =
            StatusCode::from_u16(status.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (code, Html(CallbackPage::render(status))).into_response()
    }
}
