// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava-Client: OAuth2-authenticated access to the Strava v3 API
//!
//! This crate wraps athlete, activity, zone and gear endpoints behind a
//! single client and can reshape activity lists into a flat table.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod settings;
pub mod time_utils;

pub use config::Config;
pub use error::{Result, StravaError};
pub use models::{ActivitiesOutput, ActivityInfo, ActivityQuery, AthleteInfo, OutputFormat, Table};
pub use services::StravaClient;
pub use settings::{EnvFileStore, MemorySettings, SettingsStore};
