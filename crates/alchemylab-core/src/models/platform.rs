// ABOUTME: Platform identifier enum covering ad, analytics, and AI providers
// ABOUTME: Stable lowercase string form doubles as lookup key and OAuth state value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Broad grouping of a platform, used to decide which flows it participates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformCategory {
    /// Ad network reachable through an OAuth authorization-code flow
    Advertising,
    /// Product analytics service (API-key based)
    Analytics,
    /// AI model provider (API-key based)
    AiService,
}

/// Third-party platform an organization can connect
///
/// The set is closed; the lowercase identifier returned by [`Platform::as_str`]
/// is what appears in URLs, database rows, and the OAuth `state` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Facebook / Meta Ads
    Facebook,
    /// Google Ads
    Google,
    /// `LinkedIn` Marketing
    LinkedIn,
    /// `TikTok` for Business
    TikTok,
    /// Pinterest Ads
    Pinterest,
    /// Mixpanel analytics
    Mixpanel,
    /// Amplitude analytics
    Amplitude,
    /// `OpenAI`
    OpenAi,
}

impl Platform {
    /// Every known platform, in display order
    pub const ALL: [Self; 8] = [
        Self::Facebook,
        Self::Google,
        Self::LinkedIn,
        Self::TikTok,
        Self::Pinterest,
        Self::Mixpanel,
        Self::Amplitude,
        Self::OpenAi,
    ];

    /// Stable lowercase identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Google => "google",
            Self::LinkedIn => "linkedin",
            Self::TikTok => "tiktok",
            Self::Pinterest => "pinterest",
            Self::Mixpanel => "mixpanel",
            Self::Amplitude => "amplitude",
            Self::OpenAi => "openai",
        }
    }

    /// Human-readable name for messages and pages
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Google => "Google",
            Self::LinkedIn => "LinkedIn",
            Self::TikTok => "TikTok",
            Self::Pinterest => "Pinterest",
            Self::Mixpanel => "Mixpanel",
            Self::Amplitude => "Amplitude",
            Self::OpenAi => "OpenAI",
        }
    }

    /// Category of this platform
    #[must_use]
    pub const fn category(&self) -> PlatformCategory {
        match self {
            Self::Facebook | Self::Google | Self::LinkedIn | Self::TikTok | Self::Pinterest => {
                PlatformCategory::Advertising
            }
            Self::Mixpanel | Self::Amplitude => PlatformCategory::Analytics,
            Self::OpenAi => PlatformCategory::AiService,
        }
    }

    /// Whether this platform connects through an OAuth authorization-code flow
    #[must_use]
    pub const fn supports_oauth(&self) -> bool {
        matches!(self.category(), PlatformCategory::Advertising)
    }

    /// Platforms that connect through OAuth
    pub fn oauth_platforms() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(Self::supports_oauth)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == normalized)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown platform: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_identifier() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" LinkedIn ".parse::<Platform>().unwrap(), Platform::LinkedIn);
    }

    #[test]
    fn test_unknown_platform_rejected() {
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn test_analytics_and_ai_have_no_oauth() {
        assert!(!Platform::Mixpanel.supports_oauth());
        assert!(!Platform::Amplitude.supports_oauth());
        assert!(!Platform::OpenAi.supports_oauth());
        assert_eq!(Platform::oauth_platforms().count(), 5);
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&Platform::TikTok).unwrap();
        assert_eq!(json, "\"tiktok\"");
    }
}
