// ABOUTME: OAuth callback status model and the action offered for each outcome
// ABOUTME: Tagged failure kinds drive presentation; free-text classification is a boundary adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! # Callback Status
//!
//! The callback page shows one of three states. The caller decides which one;
//! this module only maps a state to its message, glyph, and follow-up action.

/// HTML rendering of the callback page
pub mod page;

pub use page::CallbackPage;

use serde::{Deserialize, Serialize};

use crate::constants::pages;
use crate::models::Platform;

/// Why an OAuth callback failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The user has no active session
    NotAuthenticated,
    /// The user declined the provider's consent screen
    AccessDenied,
    /// The redirect lacked a code or carried an unknown state
    InvalidCallback,
    /// The code could not be exchanged for tokens
    ExchangeFailed,
    /// Anything else
    Unknown,
}

impl FailureKind {
    /// Classify a free-text failure message
    ///
    /// Only for messages from sources that do not report a kind. A
    /// case-insensitive match on "not logged in" or "authenticated" means the
    /// session is missing; everything else is `Unknown`.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();
        if lowered.contains("not logged in") || lowered.contains("authenticated") {
            Self::NotAuthenticated
        } else {
            Self::Unknown
        }
    }

    /// HTTP status used when rendering a failure page
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::NotAuthenticated => 401,
            Self::AccessDenied => 403,
            Self::InvalidCallback => 400,
            Self::ExchangeFailed => 502,
            Self::Unknown => 500,
        }
    }
}

/// A failed callback with its kind and user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct CallbackFailure {
    /// Failure classification
    pub kind: FailureKind,
    /// Message shown to the user
    pub message: String,
}

impl CallbackFailure {
    /// Create a failure with an explicit kind
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a failure from a message that carries no kind
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: FailureKind::classify(&message),
            message,
        }
    }

    /// The user has no session
    #[must_use]
    pub fn not_authenticated() -> Self {
        Self::new(FailureKind::NotAuthenticated, "User is not logged in")
    }
}

/// Follow-up action offered on the callback page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackAction {
    /// Proceed to the dashboard
    Continue,
    /// Sign in again
    LogIn,
    /// Restart the connection flow
    TryAgain,
}

impl CallbackAction {
    /// Button label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Continue => "Continue",
            Self::LogIn => "Log In",
            Self::TryAgain => "Try Again",
        }
    }

    /// Link target
    #[must_use]
    pub const fn href(self) -> &'static str {
        match self {
            Self::Continue => pages::DASHBOARD,
            Self::LogIn => pages::LOGIN,
            Self::TryAgain => pages::INTEGRATIONS,
        }
    }
}

/// State of an OAuth callback as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CallbackStatus {
    /// Exchange in progress
    Loading,
    /// Connection stored
    Success {
        /// Platform that was connected, when known
        platform: Option<Platform>,
    },
    /// Connection failed
    Error(CallbackFailure),
}

impl CallbackStatus {
    /// Action offered for this state; `Loading` offers none
    #[must_use]
    pub const fn action(&self) -> Option<CallbackAction> {
        match self {
            Self::Loading => None,
            Self::Success { .. } => Some(CallbackAction::Continue),
            Self::Error(failure) => match failure.kind {
                FailureKind::NotAuthenticated => Some(CallbackAction::LogIn),
                _ => Some(CallbackAction::TryAgain),
            },
        }
    }

    /// Headline for this state
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Loading => "Connecting your account",
            Self::Success { .. } => "Connection successful",
            Self::Error(_) => "Connection failed",
        }
    }

    /// Message for this state
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Loading => "Please wait while we complete the connection...".to_owned(),
            Self::Success {
                platform: Some(platform),
            } => format!(
                "Your {} account has been connected successfully.",
                platform.display_name()
            ),
            Self::Success { platform: None } => {
                "Your account has been connected successfully.".to_owned()
            }
            Self::Error(failure) => failure.message.clone(),
        }
    }

    /// HTTP status for a rendered page in this state
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Loading | Self::Success { .. } => 200,
            Self::Error(failure) => failure.kind.http_status(),
        }
    }

    /// Whether this is a terminal state
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

impl From<Result<Option<Platform>, CallbackFailure>> for CallbackStatus {
    fn from(result: Result<Option<Platform>, CallbackFailure>) -> Self {
        match result {
            Ok(platform) => Self::Success { platform },
            Err(failure) => Self::Error(failure),
        }
    }
}
