// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Client demo
//!
//! Loads credentials from `.env`, fetches the latest 100 activities and
//! prints them as a flattened table.

use anyhow::Context;
use strava_client::{ActivitiesOutput, ActivityQuery, OutputFormat, StravaClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let client = StravaClient::from_env().context("Failed to build Strava client")?;

    let query = ActivityQuery::new().per_page(100);
    let activities = client
        .get_athlete_activities(&query, OutputFormat::Df)
        .await
        .context("Failed to fetch activities")?;

    match activities {
        ActivitiesOutput::Table(table) => println!("{}", table),
        ActivitiesOutput::Json(value) => println!("{:#}", value),
    }
    Ok(())
}

/// Initialize structured JSON logging on stderr, leaving stdout for output.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_writer(std::io::stderr)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("strava_client=debug,info")),
        )
        .with(format)
        .init();
}
