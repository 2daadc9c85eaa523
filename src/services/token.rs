// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth2 refresh-token exchange with an expiry-aware access token cache.
//!
//! Handles:
//! - Exchanging the configured refresh token for an access token
//! - Reusing the access token until shortly before it expires
//! - Serializing refreshes so concurrent callers share one exchange
//! - Picking up a rotated refresh token (in memory only)

use crate::config::Config;
use crate::error::{Result, StravaError};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

/// Margin before token expiration when we proactively refresh (5 minutes).
const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Cached access token with expiry information.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) < self.expires_at
    }
}

#[derive(Debug)]
struct TokenState {
    refresh_token: String,
    cached: Option<CachedToken>,
}

/// Mints bearer tokens from the configured refresh token.
#[derive(Debug)]
pub struct TokenManager {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    /// Held across the exchange so only one refresh is in flight.
    state: Mutex<TokenState>,
}

impl TokenManager {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            token_url: format!("{}/oauth/token", config.base_url),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            state: Mutex::new(TokenState {
                refresh_token: config.refresh_token.clone(),
                cached: None,
            }),
        }
    }

    /// Get a valid access token, refreshing with Strava when needed.
    ///
    /// Callers that arrive while a refresh is running wait for it and then
    /// reuse its result instead of issuing their own exchange.
    pub async fn get_access_token(&self) -> Result<String> {
        let mut state = self.state.lock().await;

        if let Some(cached) = &state.cached {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.access_token.clone());
            }
            tracing::debug!(expires_at = %cached.expires_at, "Cached access token expiring, refreshing");
        }

        let response = self.exchange(&state.refresh_token).await?;

        if let Some(rotated) = response.refresh_token {
            if rotated != state.refresh_token {
                tracing::info!("Strava rotated the refresh token");
                state.refresh_token = rotated;
            }
        }

        state.cached = response
            .expires_at
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|expires_at| CachedToken {
                access_token: response.access_token.clone(),
                expires_at,
            });

        tracing::info!(
            expires_at = ?state.cached.as_ref().map(|c| c.expires_at),
            "Access token refreshed"
        );
        Ok(response.access_token)
    }

    /// Drop the cached access token so the next call refreshes.
    pub async fn invalidate(&self) {
        self.state.lock().await.cached = None;
    }

    /// POST the refresh grant and decode the token response.
    async fn exchange(&self, refresh_token: &str) -> Result<RefreshedToken> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| StravaError::Transport(format!("Token refresh request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StravaError::Transport(format!("Token refresh read failed: {}", e)))?;

        let parsed: TokenRefreshResponse = serde_json::from_str(&body).map_err(|e| {
            StravaError::MalformedResponse(format!("token response (HTTP {}): {}", status, e))
        })?;

        match parsed.access_token {
            Some(access_token) => Ok(RefreshedToken {
                access_token,
                refresh_token: parsed.refresh_token,
                expires_at: parsed.expires_at,
            }),
            None => {
                tracing::error!(status = %status, body = %body, "Strava token exchange failed");
                Err(StravaError::Authentication(format!(
                    "token response has no access_token (HTTP {}: {})",
                    status,
                    parsed.message.as_deref().unwrap_or("no message")
                )))
            }
        }
    }
}

/// Token refresh response from Strava. Error bodies share this shape with
/// every token field absent and a `message` set.
#[derive(Debug, Deserialize)]
struct TokenRefreshResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    message: Option<String>,
}

#[derive(Debug)]
struct RefreshedToken {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_token_freshness_margin() {
        let now = Utc::now();
        let token = |secs| CachedToken {
            access_token: "t".to_string(),
            expires_at: now + Duration::seconds(secs),
        };

        assert!(token(3600).is_fresh(now));
        assert!(!token(TOKEN_REFRESH_MARGIN_SECS).is_fresh(now));
        assert!(!token(60).is_fresh(now));
        assert!(!token(-10).is_fresh(now));
    }

    #[test]
    fn test_error_body_decodes_without_token() {
        let body = r#"{"message":"Bad Request","errors":[{"resource":"RefreshToken","field":"refresh_token","code":"invalid"}]}"#;
        let parsed: TokenRefreshResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.access_token.is_none());
        assert_eq!(parsed.message.as_deref(), Some("Bad Request"));
    }
}
