// ABOUTME: Connection lookup route exposing an organization's platform connection status
// ABOUTME: Resolves the organization from a request header and never echoes tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::constants::headers;
use crate::errors::AppError;
use crate::models::{OrganizationId, Platform};
use crate::server::ServerResources;
use crate::services::platform_service::CredentialsSummary;
use crate::services::{ConnectionKey, ConnectionLookup, LookupState};

/// Optional connection pin
#[derive(Debug, Default, Deserialize)]
pub struct ConnectionQuery {
    /// Specific connection row id
    pub connection_id: Option<String>,
}

/// Connection status returned to the dashboard
#[derive(Debug, Serialize)]
pub struct ConnectionResponse {
    /// Requested platform
    pub platform: Platform,
    /// Whether stored credentials were found
    pub connected: bool,
    /// Whether the user must go through the OAuth flow again
    pub needs_reauthorization: bool,
    /// Always false once the response is produced
    pub is_loading: bool,
    /// Platform-specific failure message
    pub error: Option<String>,
    /// Credential metadata, when connected
    pub credentials: Option<CredentialsSummary>,
}

impl ConnectionResponse {
    fn from_state(platform: Platform, state: LookupState) -> Self {
        let summary = state.service.as_ref().map(crate::services::PlatformService::summary);
        Self {
            platform,
            connected: summary.as_ref().is_some_and(|s| s.connected),
            needs_reauthorization: summary.as_ref().is_none_or(|s| s.needs_reauthorization),
            is_loading: state.is_loading,
            error: state.error,
            credentials: summary.and_then(|s| s.credentials),
        }
    }
}

/// Connection routes implementation
pub struct ConnectionRoutes;

impl ConnectionRoutes {
    /// Create all connection routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/connections/:platform", get(Self::handle_get_connection))
            .with_state(resources)
    }

    async fn handle_get_connection(
        State(resources): State<Arc<ServerResources>>,
        Path(platform): Path<String>,
        Query(query): Query<ConnectionQuery>,
        request_headers: HeaderMap,
    ) -> Result<Json<ConnectionResponse>, AppError> {
        let platform: Platform = platform.parse()?;
        let organization_id = Self::organization_from_headers(&request_headers)?;

        let mut key = ConnectionKey::new(platform, organization_id);
        if let Some(connection_id) = query.connection_id.filter(|id| !id.is_empty()) {
            key = key.with_connection_id(connection_id);
        }

        // A dropped handler (client gone) drops the lookup, which discards its result
        let lookup = ConnectionLookup::new(resources.resolver.clone());
        lookup.request(key);
        let state = lookup.settled().await;

        Ok(Json(ConnectionResponse::from_state(platform, state)))
    }

    fn organization_from_headers(
        request_headers: &HeaderMap,
    ) -> Result<Option<OrganizationId>, AppError> {
        let Some(value) = request_headers.get(headers::ORGANIZATION_ID) else {
            return Ok(None);
        };

        value
            .to_str()
            .ok()
            .and_then(|raw| raw.parse::<OrganizationId>().ok())
            .map(Some)
            .ok_or_else(|| {
                AppError::invalid_input(format!("{} must be a UUID", headers::ORGANIZATION_ID))
            })
    }
}
