//! # MasterBot Core Library
//!
//! Core logic for the MasterBot schedule assistant: a committed schedule of
//! timed events, a weighted preference model, and a recommendation engine
//! that ranks candidate events and asks an external reasoning backend for a
//! narrative explanation. The `masterbot` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Schedule**: Sorted event list with conflict detection and free-slot sweep
//! - **Recommend**: Weighted scoring, ranking, bounded enrichment, reinforcement
//! - **Reasoning**: Async trait for hosted LLM backends (OpenAI, Claude)
//! - **Storage**: TOML-based user configuration
//!
//! ## Key Components
//!
//! - [`Schedule`]: Ordered committed events
//! - [`RecommendationEngine`]: Ranking and enrichment
//! - [`ReasoningService`]: Trait for reasoning backends
//! - [`UserConfig`]: User configuration management

pub mod error;
pub mod event;
pub mod preferences;
pub mod reasoning;
pub mod recommend;
pub mod sample;
pub mod schedule;
pub mod storage;

pub use error::{ConfigError, CoreError, ReasoningError, Result, ValidationError};
pub use event::Event;
pub use preferences::{Preferences, TimeWindow, User};
pub use reasoning::{build_service, ReasoningProvider, ReasoningService};
pub use recommend::{
    EnrichmentOutcome, EnrichmentScope, Recommendation, RecommendationEngine, RecommendationSet,
    ScoreBreakdown,
};
pub use sample::sample_events;
pub use schedule::{FreeSlot, Schedule};
pub use storage::UserConfig;
