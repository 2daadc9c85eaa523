// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time conversion.

use crate::error::{Result, StravaError};
use chrono::{Local, NaiveDate, TimeZone};

/// Calendar date format accepted for activity filters.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Convert a `DD/MM/YYYY` date to Unix seconds at local midnight.
pub fn parse_date_to_epoch(date: &str) -> Result<i64> {
    let day = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|e| {
        StravaError::InvalidInput(format!("bad date format {:?} (expected DD/MM/YYYY): {}", date, e))
    })?;

    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| StravaError::InvalidInput(format!("invalid date {:?}", date)))?;

    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| {
            StravaError::InvalidInput(format!("local midnight does not exist on {:?}", date))
        })
}
