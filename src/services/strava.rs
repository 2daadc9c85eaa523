// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for athlete, activity and gear resources.
//!
//! Every request carries a bearer token from [`TokenManager`]. Response
//! bodies are returned as parsed JSON without interpretation, including
//! error payloads from non-2xx responses.

use crate::config::{Config, ATHLETE_ID_KEY};
use crate::error::{Result, StravaError};
use crate::models::{
    ActivitiesOutput, ActivityInfo, ActivityQuery, AthleteInfo, AthleteZones, HeartRateZone,
    OutputFormat, Table,
};
use crate::services::TokenManager;
use crate::settings::{EnvFileStore, SettingsStore};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Strava API client.
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenManager,
    settings: Arc<dyn SettingsStore>,
    /// Configured or lazily resolved athlete ID.
    athlete_id: OnceCell<u64>,
}

impl StravaClient {
    /// Create a client from loaded configuration.
    ///
    /// `settings` receives the athlete ID once it has been resolved.
    pub fn new(config: Config, settings: Arc<dyn SettingsStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StravaError::Transport(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            tokens: TokenManager::new(http.clone(), &config),
            http,
            base_url: config.base_url,
            settings,
            athlete_id: OnceCell::new_with(config.athlete_id),
        })
    }

    /// Create a client from the default `.env` file and process environment.
    pub fn from_env() -> Result<Self> {
        let settings: Arc<dyn SettingsStore> = Arc::new(EnvFileStore::default());
        let config = Config::load(settings.as_ref())?;
        Self::new(config, settings)
    }

    /// Forget the cached access token; the next request refreshes it.
    pub async fn invalidate_access_token(&self) {
        self.tokens.invalidate().await;
    }

    // ─── Athlete ─────────────────────────────────────────────────────────────

    /// Get the athlete ID, resolving and persisting it on first use if it
    /// was not configured.
    pub async fn get_athlete_id(&self) -> Result<u64> {
        self.athlete_id
            .get_or_try_init(|| self.resolve_and_persist_athlete_id())
            .await
            .copied()
    }

    /// Look up the authenticated athlete's ID and write it to the settings store.
    ///
    /// The ID this client already holds (configured or resolved earlier)
    /// is kept for the rest of its lifetime; a different value only takes
    /// effect for clients loaded afterwards. The mismatch is logged.
    pub async fn resolve_and_persist_athlete_id(&self) -> Result<u64> {
        let profile = self.run_request("/athlete", &[]).await?;
        let AthleteRef { id } = serde_json::from_value(profile)
            .map_err(|e| StravaError::MalformedResponse(format!("athlete profile: {}", e)))?;

        self.settings.set(ATHLETE_ID_KEY, &id.to_string())?;
        // Already set when configured, resolved earlier, or mid-initialization in get_athlete_id.
        if self.athlete_id.set(id).is_err() {
            if let Some(&current) = self.athlete_id.get() {
                if current != id {
                    tracing::warn!(
                        configured = current,
                        resolved = id,
                        "Resolved athlete ID differs from the one in use; keeping the current ID"
                    );
                }
            }
        }

        tracing::info!(athlete_id = id, "Athlete ID resolved and saved");
        Ok(id)
    }

    /// Get the athlete profile, or one of its sub-resources.
    ///
    /// Zones come back as the heart-rate zone list only, re-encoded from
    /// [`HeartRateZone`]: each zone keeps `min` and `max`, any other
    /// per-zone field Strava sends is dropped.
    pub async fn get_athlete_data(&self, info: Option<AthleteInfo>) -> Result<Value> {
        match info {
            None => self.run_request("/athlete", &[]).await,
            Some(AthleteInfo::Zones) => {
                let zones = self.get_athlete_zones().await?;
                serde_json::to_value(zones)
                    .map_err(|e| StravaError::MalformedResponse(format!("zones: {}", e)))
            }
            Some(info) => {
                let athlete_id = self.get_athlete_id().await?;
                let path = format!("/athletes/{}/{}", athlete_id, info);
                self.run_request(&path, &[]).await
            }
        }
    }

    /// Get all-time, recent and year-to-date totals.
    pub async fn get_athlete_stats(&self) -> Result<Value> {
        self.get_athlete_data(Some(AthleteInfo::Stats)).await
    }

    /// Get routes created by the athlete.
    pub async fn get_athlete_routes(&self) -> Result<Value> {
        self.get_athlete_data(Some(AthleteInfo::Routes)).await
    }

    /// Get the athlete's heart-rate zones.
    pub async fn get_athlete_zones(&self) -> Result<Vec<HeartRateZone>> {
        let payload = self.run_request("/athlete/zones", &[]).await?;
        let zones: AthleteZones = serde_json::from_value(payload)
            .map_err(|e| StravaError::MalformedResponse(format!("zones: {}", e)))?;
        Ok(zones.heart_rate.zones)
    }

    // ─── Activities ──────────────────────────────────────────────────────────

    /// List the athlete's activities.
    ///
    /// Date filters are validated before any request is made.
    pub async fn get_athlete_activities(
        &self,
        query: &ActivityQuery,
        format: OutputFormat,
    ) -> Result<ActivitiesOutput> {
        let params = query.to_params()?;
        let activities = self.run_request("/athlete/activities", &params).await?;

        Ok(match format {
            OutputFormat::Json => ActivitiesOutput::Json(activities),
            OutputFormat::Df => {
                let table = Table::from_json(&activities);
                tracing::debug!(
                    rows = table.len(),
                    columns = table.columns().len(),
                    "Activities flattened"
                );
                ActivitiesOutput::Table(table)
            }
        })
    }

    /// Get an activity, or its comments, laps or kudos.
    pub async fn get_activity_data(
        &self,
        activity_id: u64,
        info: Option<ActivityInfo>,
    ) -> Result<Value> {
        let path = match info {
            None => format!("/activities/{}", activity_id),
            Some(info) => format!("/activities/{}/{}", activity_id, info),
        };
        self.run_request(&path, &[]).await
    }

    // ─── Gear ────────────────────────────────────────────────────────────────

    /// Get a piece of equipment (e.g. `b1234` for a bike, `g5678` for shoes).
    pub async fn get_equipment(&self, gear_id: &str) -> Result<Value> {
        let gear_id = gear_id.trim();
        if gear_id.is_empty() {
            return Err(StravaError::InvalidInput("gear id is empty".to_string()));
        }
        let path = format!("/gear/{}", urlencoding::encode(gear_id));
        self.run_request(&path, &[]).await
    }

    // ─── Transport ───────────────────────────────────────────────────────────

    /// Authenticated GET returning the parsed JSON body.
    ///
    /// Non-2xx responses are not errors: their JSON body (usually a
    /// `message`/`errors` object) is returned like any other.
    pub async fn run_request(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let access_token = self.tokens.get_access_token().await?;
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(%url, params = params.len(), "Strava GET");

        let mut request = self.http.get(&url).bearer_auth(&access_token);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StravaError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StravaError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = %status, %url, "Strava returned an error status");
        }

        serde_json::from_str(&body).map_err(|e| {
            StravaError::MalformedResponse(format!("GET {} (HTTP {}): {}", path, status, e))
        })
    }
}

/// Just enough of the athlete profile to learn the ID.
#[derive(Debug, Deserialize)]
struct AthleteRef {
    id: u64,
}
