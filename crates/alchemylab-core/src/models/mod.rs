// ABOUTME: Core data models shared across the AlchemyLab workspace
// ABOUTME: Re-exports platform identifiers, organization ids, and connection records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

/// Stored connection records and the credentials projected from them
pub mod connection;
/// Tenant-scoping identifier
pub mod organization;
/// Closed set of third-party platform identifiers
pub mod platform;

pub use connection::{PlatformConnection, PlatformCredentials};
pub use organization::OrganizationId;
pub use platform::{Platform, PlatformCategory};
