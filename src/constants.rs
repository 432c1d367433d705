// ABOUTME: Application constants re-exported from alchemylab-core
// ABOUTME: Provider endpoints, scopes, callback paths, ports, and environment keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

pub use alchemylab_core::constants::*;

/// Paths the callback page links to
pub mod pages {
    /// Where a successful connection continues to
    pub const DASHBOARD: &str = "/dashboard";
    /// Sign-in page for expired or missing sessions
    pub const LOGIN: &str = "/auth";
    /// Integrations page where a failed flow can be restarted
    pub const INTEGRATIONS: &str = "/dashboard/integrations";
}
