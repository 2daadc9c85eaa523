// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Request options and response shapes.

pub mod request;
pub mod table;
pub mod zones;

pub use request::{ActivitiesOutput, ActivityInfo, ActivityQuery, AthleteInfo, OutputFormat};
pub use table::Table;
pub use zones::{AthleteZones, HeartRateZone, HeartRateZones};
