// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use serde_json::json;
use std::sync::Arc;
use strava_client::{Config, MemorySettings, SettingsStore, StravaClient};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bearer token handed out by the mocked token endpoint.
#[allow(dead_code)]
pub const TEST_ACCESS_TOKEN: &str = "test_access_token";

/// Config pointing at the mock server.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config {
        base_url: server.uri(),
        ..Config::test_default()
    }
}

/// Create a client against the mock server with in-memory settings.
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> StravaClient {
    test_client_with(test_config(server), Arc::new(MemorySettings::new()))
}

#[allow(dead_code)]
pub fn test_client_with(config: Config, settings: Arc<dyn SettingsStore>) -> StravaClient {
    StravaClient::new(config, settings).expect("Failed to build client")
}

/// Successful refresh response valid for `expires_in` seconds.
#[allow(dead_code)]
pub fn token_response(access_token: &str, expires_in: i64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "token_type": "Bearer",
        "access_token": access_token,
        "expires_at": chrono::Utc::now().timestamp() + expires_in,
        "expires_in": expires_in,
        "refresh_token": "test_refresh_token"
    }))
}

/// Mount a token endpoint expecting exactly `calls` refresh-grant exchanges.
#[allow(dead_code)]
pub async fn mount_token(server: &MockServer, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(token_response(TEST_ACCESS_TOKEN, 6 * 3600))
        .expect(calls)
        .mount(server)
        .await;
}
