// ABOUTME: OAuth provider authorize endpoints, default scopes, and callback paths
// ABOUTME: Centralizes provider strings to eliminate hardcoded literals in the builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! OAuth provider constants

/// Shared browser callback path used by most providers
pub const SHARED_CALLBACK_PATH: &str = "/oauth/callback";

/// Prefix of the dedicated server-side callback route (`/api/auth/callback/<provider>`)
pub const SERVER_CALLBACK_PREFIX: &str = "/api/auth/callback";

/// Facebook Marketing API authorize endpoint
pub const FACEBOOK_AUTH_URL: &str = "https://www.facebook.com/v22.0/dialog/oauth";

/// Google Ads authorize endpoint
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// `LinkedIn` Marketing authorize endpoint
pub const LINKEDIN_AUTH_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";

/// `TikTok` Marketing API authorize endpoint
pub const TIKTOK_AUTH_URL: &str = "https://ads.tiktok.com/marketing_api/auth";

/// Pinterest authorize endpoint
pub const PINTEREST_AUTH_URL: &str = "https://www.pinterest.com/oauth/";

/// Facebook scopes (comma-separated as per Graph API requirements)
pub const FACEBOOK_SCOPES: &[&str] = &["ads_management", "ads_read", "business_management"];

/// Google Ads scopes (space-separated)
pub const GOOGLE_SCOPES: &[&str] = &["https://www.googleapis.com/auth/adwords"];

/// `LinkedIn` scopes (space-separated)
pub const LINKEDIN_SCOPES: &[&str] = &["r_ads", "r_ads_reporting", "rw_ads"];

/// `TikTok` scopes (comma-separated)
pub const TIKTOK_SCOPES: &[&str] = &["ads.read", "ads.management"];

/// Pinterest scopes (comma-separated)
pub const PINTEREST_SCOPES: &[&str] = &["ads:read", "boards:read", "user_accounts:read"];
