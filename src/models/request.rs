// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Typed options for the resource accessors.
//!
//! Every selector parses case-insensitively from a string so callers can
//! pass user input straight through; unknown values are rejected before
//! any request is made.

use crate::error::{Result, StravaError};
use crate::models::Table;
use crate::time_utils::parse_date_to_epoch;
use std::fmt;
use std::str::FromStr;

/// Sub-resource of `/athletes/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AthleteInfo {
    Stats,
    /// Served from `/athlete/zones`, not `/athletes/{id}/zones`.
    Zones,
    Routes,
}

impl AthleteInfo {
    pub fn as_str(&self) -> &'static str {
        match self {
            AthleteInfo::Stats => "stats",
            AthleteInfo::Zones => "zones",
            AthleteInfo::Routes => "routes",
        }
    }
}

impl FromStr for AthleteInfo {
    type Err = StravaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stats" => Ok(AthleteInfo::Stats),
            "zones" => Ok(AthleteInfo::Zones),
            "routes" => Ok(AthleteInfo::Routes),
            other => Err(StravaError::InvalidInput(format!(
                "unknown athlete info {:?} (expected stats, zones or routes)",
                other
            ))),
        }
    }
}

impl fmt::Display for AthleteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-resource of `/activities/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityInfo {
    Comments,
    Laps,
    Kudos,
}

impl ActivityInfo {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityInfo::Comments => "comments",
            ActivityInfo::Laps => "laps",
            ActivityInfo::Kudos => "kudos",
        }
    }
}

impl FromStr for ActivityInfo {
    type Err = StravaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comments" => Ok(ActivityInfo::Comments),
            "laps" => Ok(ActivityInfo::Laps),
            "kudos" => Ok(ActivityInfo::Kudos),
            other => Err(StravaError::InvalidInput(format!(
                "unknown activity info {:?} (expected comments, laps or kudos)",
                other
            ))),
        }
    }
}

impl fmt::Display for ActivityInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the activity list returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Parsed JSON, unchanged
    #[default]
    Json,
    /// Flattened table, one row per activity
    Df,
}

impl FromStr for OutputFormat {
    type Err = StravaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JSON" => Ok(OutputFormat::Json),
            "DF" => Ok(OutputFormat::Df),
            other => Err(StravaError::InvalidInput(format!(
                "unknown output format {:?} (expected JSON or DF)",
                other
            ))),
        }
    }
}

/// Filters for `GET /athlete/activities`.
///
/// Dates are calendar days in `DD/MM/YYYY` form, interpreted as local midnight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    pub after: Option<String>,
    pub before: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl ActivityQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(mut self, date: impl Into<String>) -> Self {
        self.after = Some(date.into());
        self
    }

    pub fn before(mut self, date: impl Into<String>) -> Self {
        self.before = Some(date.into());
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Build the query string parameters, converting dates to epoch seconds.
    ///
    /// Fails on an unparseable date, so callers must run this before any
    /// network traffic.
    pub fn to_params(&self) -> Result<Vec<(&'static str, String)>> {
        let mut params = Vec::new();

        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(after) = self.after.as_deref() {
            params.push(("after", parse_date_to_epoch(after)?.to_string()));
        }
        if let Some(before) = self.before.as_deref() {
            params.push(("before", parse_date_to_epoch(before)?.to_string()));
        }

        Ok(params)
    }
}

/// Activity list in the requested [`OutputFormat`].
#[derive(Debug, Clone, PartialEq)]
pub enum ActivitiesOutput {
    Json(serde_json::Value),
    Table(Table),
}

impl ActivitiesOutput {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ActivitiesOutput::Json(v) => Some(v),
            ActivitiesOutput::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            ActivitiesOutput::Table(t) => Some(t),
            ActivitiesOutput::Json(_) => None,
        }
    }
}
