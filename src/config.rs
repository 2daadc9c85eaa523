//! Client configuration loaded from a settings source.
//!
//! Credentials are read once when the client is built. Missing
//! credentials are not rejected here; Strava reports them later as an
//! authentication failure.

use crate::settings::{EnvFileStore, SettingsStore};
use std::time::Duration;

pub const CLIENT_ID_KEY: &str = "CLIENT_ID";
pub const CLIENT_SECRET_KEY: &str = "CLIENT_SECRET";
pub const REFRESH_TOKEN_KEY: &str = "REFRESH_TOKEN";
pub const ATHLETE_ID_KEY: &str = "ATHLETE_ID";
pub const BASE_URL_KEY: &str = "STRAVA_API_BASE_URL";
pub const TIMEOUT_KEY: &str = "STRAVA_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://www.strava.com/api/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID
    pub client_id: String,
    /// Strava OAuth client secret
    pub client_secret: String,
    /// Long-lived refresh token used to mint access tokens
    pub refresh_token: String,
    /// Athlete ID, if already known. Resolved from `/athlete` otherwise.
    pub athlete_id: Option<u64>,
    /// API root, without trailing slash
    pub base_url: String,
    /// Per-request timeout for every HTTP call
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from the default `.env` file and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&EnvFileStore::default())
    }

    /// Load configuration from an arbitrary settings source.
    pub fn load(settings: &dyn SettingsStore) -> Result<Self, ConfigError> {
        let credential = |key: &'static str| {
            settings.get(key).map(|v| v.trim().to_string()).unwrap_or_else(|| {
                tracing::warn!(key, "Credential not set; Strava will reject requests");
                String::new()
            })
        };

        let athlete_id = match settings.get(ATHLETE_ID_KEY) {
            Some(raw) if !raw.trim().is_empty() => Some(parse_value(ATHLETE_ID_KEY, &raw)?),
            _ => None,
        };

        let request_timeout = match settings.get(TIMEOUT_KEY) {
            Some(raw) => match parse_value(TIMEOUT_KEY, &raw)? {
                // reqwest fails every request with a zero timeout
                0 => {
                    return Err(ConfigError::Invalid {
                        key: TIMEOUT_KEY,
                        value: raw,
                    })
                }
                secs => Duration::from_secs(secs),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let base_url = settings
            .get(BASE_URL_KEY)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client_id: credential(CLIENT_ID_KEY),
            client_secret: credential(CLIENT_SECRET_KEY),
            refresh_token: credential(REFRESH_TOKEN_KEY),
            athlete_id,
            base_url,
            request_timeout,
        })
    }

    /// Fixed credentials for tests.
    pub fn test_default() -> Self {
        Self {
            client_id: "test_client_id".to_string(),
            client_secret: "test_secret".to_string(),
            refresh_token: "test_refresh_token".to_string(),
            athlete_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn parse_value(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("Settings store error: {0}")]
    Settings(String),
}
