// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Athlete training zones as returned by `GET /athlete/zones`.

use serde::{Deserialize, Serialize};

/// Zones payload. Only the heart-rate section is modeled; power zones
/// and anything else at the top level are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AthleteZones {
    pub heart_rate: HeartRateZones,
}

/// Heart-rate zone configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HeartRateZones {
    /// Whether the athlete set the zones manually
    #[serde(default)]
    pub custom_zones: bool,
    pub zones: Vec<HeartRateZone>,
}

/// One heart-rate zone in beats per minute.
///
/// Strava marks the open upper bound of the last zone with `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateZone {
    pub min: i32,
    pub max: i32,
}

impl HeartRateZone {
    /// True if this zone has no upper bound.
    pub fn is_open_ended(&self) -> bool {
        self.max < 0
    }
}
