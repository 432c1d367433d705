// ABOUTME: Domain service layer for platform service handles and connection lookup
// ABOUTME: Resolves stored connections into usable handles without touching HTTP concerns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! Domain service layer
//!
//! Services here are independent of the HTTP surface so the same lookup can
//! back a route, a background job, or a test.

/// Cancellable connection lookup and its one-shot resolver
pub mod connection_lookup;

/// Platform service handles built from stored credentials
pub mod platform_service;

pub use connection_lookup::{ConnectionKey, ConnectionLookup, ConnectionResolver, LookupState};
pub use platform_service::PlatformService;
