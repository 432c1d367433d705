// ABOUTME: Main library entry point for the AlchemyLab connection service
// ABOUTME: OAuth authorization for ad platforms, callback handling, and credential lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

#![deny(unsafe_code)]

//! # AlchemyLab Connect
//!
//! Connects an organization's ad-platform accounts (Facebook, Google, `LinkedIn`,
//! `TikTok`, Pinterest) to AlchemyLab through the providers' OAuth
//! authorization-code flows, and resolves stored credentials into service handles.
//!
//! ## Flow
//!
//! 1. [`oauth::AuthorizationUrlBuilder`] builds the provider authorize URL; the
//!    browser is redirected there.
//! 2. The provider redirects back; [`oauth::OAuthRedirect`] extracts `code`,
//!    `state`, and `error`.
//! 3. A [`oauth::CodeExchange`] implementation hands the code to the backend
//!    function that stores tokens.
//! 4. [`callback::CallbackPage`] reports the outcome to the user.
//! 5. Later, [`services::ConnectionLookup`] reads the stored row and builds a
//!    [`services::PlatformService`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use alchemylab_connect::config::environment::ServerConfig;
//! use alchemylab_connect::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// OAuth callback status presentation
pub mod callback;

/// Configuration loaded from the environment
pub mod config;

/// Application constants re-exported from `alchemylab-core`
pub mod constants;

/// Connection store backed by `SQLite`
pub mod database;

/// Unified error handling re-exported from `alchemylab-core`
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// Core data models re-exported from `alchemylab-core`
pub mod models;

/// OAuth authorize URLs, redirect parsing, and code exchange
pub mod oauth;

/// HTTP route handlers
pub mod routes;

/// Session cookie helpers
pub mod security;

/// Server resources and HTTP server lifecycle
pub mod server;

/// Connection lookup and platform service handles
pub mod services;
