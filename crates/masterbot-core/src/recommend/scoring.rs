//! Multi-signal event scoring.
//!
//! ```text
//! score = 0.5 * interest + 0.3 * time + 0.2 * location
//! ```
//!
//! The interest term averages raw integer weights, so the total is only
//! bounded to [0, 1] when every weight is 0 or 1. Nothing is clamped.

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::preferences::Preferences;

pub const INTEREST_WEIGHT: f64 = 0.5;
pub const TIME_WEIGHT: f64 = 0.3;
pub const LOCATION_WEIGHT: f64 = 0.2;

/// Time score for an event outside every preferred window.
pub const OUTSIDE_WINDOW_SCORE: f64 = 0.5;
/// Location score when either side has no location string.
pub const UNKNOWN_LOCATION_SCORE: f64 = 0.8;

/// Per-term scores for one event, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub interest: f64,
    pub time: f64,
    pub location: f64,
}

impl ScoreBreakdown {
    pub fn compute(event: &Event, preferences: &Preferences) -> Self {
        let hour = event.start().with_timezone(&Local).hour();
        Self {
            interest: interest_score(event, preferences),
            time: time_preference_score(hour, preferences),
            location: location_score(event, preferences),
        }
    }

    pub fn total(&self) -> f64 {
        INTEREST_WEIGHT * self.interest + TIME_WEIGHT * self.time + LOCATION_WEIGHT * self.location
    }
}

/// Weighted score of `event` against `preferences`, using the local-timezone
/// hour of the event start.
pub fn calculate_event_score(event: &Event, preferences: &Preferences) -> f64 {
    ScoreBreakdown::compute(event, preferences).total()
}

/// Mean weight over the event's tags that are interests; 0 when none match.
/// Weights are summed as `f64`, so extreme weights cannot overflow.
pub fn interest_score(event: &Event, preferences: &Preferences) -> f64 {
    let interests = preferences.interests();
    let (total, matched) = event
        .tags()
        .iter()
        .filter_map(|tag| interests.get(tag))
        .fold((0.0, 0u32), |(sum, n), weight| (sum + *weight as f64, n + 1));

    if matched == 0 {
        0.0
    } else {
        total / f64::from(matched)
    }
}

/// Full credit with no windows or a matching window, half credit otherwise.
pub fn time_preference_score(hour: u32, preferences: &Preferences) -> f64 {
    let windows = preferences.time_windows();
    if windows.is_empty() || windows.iter().any(|w| w.contains_hour(hour)) {
        1.0
    } else {
        OUTSIDE_WINDOW_SCORE
    }
}

/// Presence check only; `max_travel_distance` is not compared against
/// anything because events carry no coordinates.
pub fn location_score(event: &Event, preferences: &Preferences) -> f64 {
    if event.location().is_empty() || preferences.home_location().is_empty() {
        UNKNOWN_LOCATION_SCORE
    } else {
        1.0
    }
}
