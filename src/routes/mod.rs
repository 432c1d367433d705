// ABOUTME: Route module organization for the AlchemyLab connection service
// ABOUTME: Assembles OAuth, connection, and health routes behind the HTTP trace layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! Route module
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the OAuth and service layers.

/// Connection lookup routes
pub mod connections;
/// Health check and readiness routes
pub mod health;
/// OAuth authorize and callback routes
pub mod oauth;

pub use connections::ConnectionRoutes;
pub use health::HealthRoutes;
pub use oauth::OAuthRoutes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::server::ServerResources;

/// Build the complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(OAuthRoutes::routes(Arc::clone(&resources)))
        .merge(ConnectionRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
}
