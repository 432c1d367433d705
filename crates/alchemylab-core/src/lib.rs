// ABOUTME: Core types and constants for the AlchemyLab connection service
// ABOUTME: Foundation crate with error handling, platform models, and OAuth constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

#![deny(unsafe_code)]

//! # AlchemyLab Core
//!
//! Foundation crate providing shared types and constants for the AlchemyLab
//! ad-platform connection service. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Provider endpoints, scopes, callback paths, and environment keys
//! - **models**: Platform identifiers, organizations, connection records, credentials

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Platform, `OrganizationId`, `PlatformConnection`, credentials)
pub mod models;
