//! Recommendation engine.
//!
//! This module provides:
//! - Weighted scoring of a candidate event against [`crate::Preferences`]
//! - Ranking and truncation of conflict-free candidates
//! - Enrichment of the ranked list by an external reasoning backend
//! - Reinforcement of interest weights from attended events

mod engine;
mod format;
mod scoring;

pub use engine::{
    EnrichmentOutcome, EnrichmentScope, Recommendation, RecommendationEngine, RecommendationSet,
    DEFAULT_ENRICHMENT_TIMEOUT, ENRICHED_PREFIX, EXCERPT_CHARS, PLACEHOLDER_REASONING,
};
pub use format::{format_event_data, format_preferences};
pub use scoring::{
    calculate_event_score, interest_score, location_score, time_preference_score, ScoreBreakdown,
    INTEREST_WEIGHT, LOCATION_WEIGHT, OUTSIDE_WINDOW_SCORE, TIME_WEIGHT, UNKNOWN_LOCATION_SCORE,
};
