//! Core error types for masterbot-core.
//!
//! The hierarchy mirrors the three collaborators the core talks to: the
//! reasoning backend, the configuration document, and config validation.
//! Nothing in the recommendation pipeline itself is fatal; reasoning errors
//! surface as values inside [`crate::recommend::EnrichmentOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for masterbot-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reasoning backend errors
    #[error("Reasoning error: {0}")]
    Reasoning(#[from] ReasoningError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the external reasoning collaborator.
#[derive(Error, Debug)]
pub enum ReasoningError {
    /// The HTTP request could not be sent or its body could not be read
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The body was not in the shape the provider returns
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The collaborator resolved with `success = false`
    #[error("Provider reported failure: {0}")]
    Provider(String),

    /// No API key in config or environment
    #[error("No API key configured for {provider}")]
    MissingApiKey { provider: String },

    /// The enrichment wait exceeded its deadline
    #[error("Enrichment timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The background enrichment task panicked or was cancelled
    #[error("Enrichment task failed: {0}")]
    TaskFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the document
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// The document failed validation
    #[error("{} validation problem(s): {}", .0.len(), join_problems(.0))]
    Invalid(Vec<ValidationError>),
}

/// A single problem found while validating a user configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is blank
    #[error("{field} cannot be empty")]
    Empty { field: String },

    /// Email has no '@'
    #[error("Valid email address required")]
    InvalidEmail,

    /// Provider is not one of the supported backends
    #[error("Default AI provider must be 'openai' or 'claude', got '{0}'")]
    UnknownProvider(String),

    /// The selected provider has no key
    #[error("{provider} API key required when using {provider} as default provider")]
    MissingApiKey { provider: String },

    /// Travel distance must be positive
    #[error("Max travel distance must be positive, got {0}")]
    NonPositiveDistance(f64),

    /// Hour outside 0-23
    #[error("Time slot #{index} has hour {hour} outside 0-23")]
    HourOutOfRange { index: usize, hour: u32 },

    /// start_hour > end_hour; midnight-spanning windows are not supported
    #[error("Time slot #{index} wraps around midnight ({start_hour}-{end_hour})")]
    WrapAroundSlot {
        index: usize,
        start_hour: u32,
        end_hour: u32,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

fn join_problems(problems: &[ValidationError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<tokio::task::JoinError> for ReasoningError {
    fn from(err: tokio::task::JoinError) -> Self {
        ReasoningError::TaskFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
