// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - token exchange and API access.

pub mod strava;
pub mod token;

pub use strava::StravaClient;
pub use token::TokenManager;
