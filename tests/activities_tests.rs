// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for activity listing and activity detail endpoints.

use serde_json::{json, Value};
use strava_client::time_utils::parse_date_to_epoch;
use strava_client::{ActivitiesOutput, ActivityInfo, ActivityQuery, OutputFormat, StravaError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{mount_token, test_client};

fn sample_activities() -> Value {
    json!([
        {
            "id": 10556240113u64,
            "name": "Morning Ride",
            "sport_type": "Ride",
            "distance": 42195.0,
            "athlete": {"id": 134815, "resource_state": 1},
            "map": {"id": "a10556240113", "summary_polyline": "ki{eFvqfiVqAWQIGEEKAYJgBVqDJ{BHa@jAkNJw@Pw@V{APs@^aABQAOEQGKoJ_FuJkFqAo@{A}@sH{DiAs@Q]?WVy@`@oBt@_CB]KYMMkB{AQEI@WT{BlE{@zAQPI@ICsCqA_BcAeCmAaFmCqIoEcLeG}KcG}A}@cDaBiDsByAkAuBqBi@y@_@o@o@kB}BgIoA_EUkAMcACa@BeBBq@LaAJe@b@uA`@_AdBcD"}
        },
        {
            "id": 10556240114u64,
            "name": "Lunch Run",
            "sport_type": "Run",
            "distance": 5012.3,
            "athlete": {"id": 134815, "resource_state": 1},
            "average_heartrate": 151.2
        }
    ])
}

#[tokio::test]
async fn test_activity_query_parameters() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    let after = parse_date_to_epoch("01/01/2024").unwrap();
    let before = parse_date_to_epoch("31/01/2024").unwrap();

    Mock::given(method("GET"))
        .and(path("/athlete/activities"))
        .and(header("Authorization", "Bearer test_access_token"))
        .and(query_param("per_page", "50"))
        .and(query_param("after", after.to_string()))
        .and(query_param("before", before.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_activities()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = ActivityQuery::new()
        .after("01/01/2024")
        .before("31/01/2024")
        .per_page(50);
    let output = client
        .get_athlete_activities(&query, OutputFormat::Json)
        .await
        .unwrap();

    assert_eq!(output, ActivitiesOutput::Json(sample_activities()));

    // Exactly these three parameters, nothing else.
    let requests = server.received_requests().await.unwrap();
    let list_request = requests
        .iter()
        .find(|r| r.url.path() == "/athlete/activities")
        .unwrap();
    let pairs: Vec<(String, String)> = list_request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("per_page".to_string(), "50".to_string()),
            ("after".to_string(), after.to_string()),
            ("before".to_string(), before.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_activities_as_table() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/athlete/activities"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_activities()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let format: OutputFormat = "df".parse().unwrap();
    let output = client
        .get_athlete_activities(&ActivityQuery::new().per_page(100), format)
        .await
        .unwrap();

    let table = output.as_table().expect("DF output should be a table");
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.columns(),
        [
            "id",
            "name",
            "sport_type",
            "distance",
            "athlete.id",
            "athlete.resource_state",
            "map.id",
            "map.summary_polyline",
            "average_heartrate",
        ]
    );
    assert_eq!(table.get(0, "athlete.id"), Some(&json!(134815)));
    assert_eq!(table.get(1, "map.id"), None);
    assert_eq!(table.get(0, "average_heartrate"), None);
}

#[tokio::test]
async fn test_error_status_body_is_returned() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    let error_body = json!({
        "message": "Authorization Error",
        "errors": [{"resource": "Athlete", "field": "access_token", "code": "invalid"}]
    });
    Mock::given(method("GET"))
        .and(path("/athlete/activities"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body.clone()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let output = client
        .get_athlete_activities(&ActivityQuery::new(), OutputFormat::Json)
        .await
        .unwrap();

    assert_eq!(output.as_json(), Some(&error_body));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/athlete/activities"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .get_athlete_activities(&ActivityQuery::new(), OutputFormat::Json)
        .await
        .unwrap_err();

    assert!(matches!(err, StravaError::MalformedResponse(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn test_activity_detail_and_sub_resources() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    let activity_id = 10556240113u64;
    let resources = [
        (format!("/activities/{activity_id}"), json!({"id": activity_id})),
        (format!("/activities/{activity_id}/comments"), json!([{"text": "Nice!"}])),
        (format!("/activities/{activity_id}/laps"), json!([{"lap_index": 1}])),
        (format!("/activities/{activity_id}/kudos"), json!([{"firstname": "Jane"}])),
    ];
    for (route, body) in &resources {
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = test_client(&server);
    let infos = [
        None,
        Some(ActivityInfo::Comments),
        Some(ActivityInfo::Laps),
        Some("KUDOS".parse::<ActivityInfo>().unwrap()),
    ];
    for (info, (_, expected)) in infos.into_iter().zip(&resources) {
        let value = client.get_activity_data(activity_id, info).await.unwrap();
        assert_eq!(&value, expected);
    }
}
