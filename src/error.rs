// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types.

use crate::config::ConfigError;

/// Errors surfaced by the Strava client.
///
/// Nothing in the client recovers from these locally; every failure is
/// returned to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum StravaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StravaError {
    /// True if the token exchange rejected the configured credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, StravaError::Authentication(_))
    }

    /// True if the caller passed something unusable (bad date, unknown format).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, StravaError::InvalidInput(_))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, StravaError>;
