// ABOUTME: Configuration management module for server and OAuth settings
// ABOUTME: Environment-only configuration validated once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! Configuration module
//!
//! - **Environment**: Server configuration from environment variables
//! - **OAuth**: Per-platform client identifiers and enablement

/// Environment and server configuration
pub mod environment;
/// OAuth client configuration per ad platform
pub mod oauth;
