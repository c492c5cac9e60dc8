//! External reasoning collaborator.
//!
//! The engine only sees the [`ReasoningService`] capability. Which hosted
//! backend sits behind it is a configuration choice expressed by the
//! [`ReasoningProvider`] tag.

mod claude;
mod client;
mod openai;
mod traits;

pub use claude::{ClaudeService, CLAUDE_BASE_URL, CLAUDE_DEFAULT_MODEL};
pub use client::ProviderSettings;
pub use openai::{OpenAiService, OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL};
pub use traits::{analyze_preferences_prompt, recommend_prompt, ReasoningService};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ConfigError, CoreError};
use crate::storage::AiServicesConfig;

/// Supported hosted backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Claude,
}

impl ReasoningProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Claude => "claude",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => OPENAI_BASE_URL,
            Self::Claude => CLAUDE_BASE_URL,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => OPENAI_DEFAULT_MODEL,
            Self::Claude => CLAUDE_DEFAULT_MODEL,
        }
    }

    /// Environment variable consulted when the configured key is empty.
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Claude => "ANTHROPIC_API_KEY",
        }
    }
}

impl fmt::Display for ReasoningProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReasoningProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "claude" | "anthropic" => Ok(Self::Claude),
            other => Err(format!("unknown reasoning provider: {other}")),
        }
    }
}

/// Build the backend selected by `config.default_provider`.
///
/// # Errors
///
/// Returns an error if the provider name is unknown, no API key is available
/// in config or environment, or the HTTP client cannot be built.
pub fn build_service(config: &AiServicesConfig) -> Result<Arc<dyn ReasoningService>, CoreError> {
    let provider: ReasoningProvider =
        config
            .default_provider
            .parse()
            .map_err(|message| ConfigError::InvalidValue {
                key: "ai_services.default_provider".into(),
                message,
            })?;

    let service_config = config.for_provider(provider);
    let settings = ProviderSettings {
        api_key: service_config.resolved_api_key(provider),
        model: service_config.model.clone(),
        max_tokens: service_config.max_tokens,
        temperature: service_config.temperature,
        base_url: if service_config.base_url.is_empty() {
            provider.default_base_url().to_string()
        } else {
            service_config.base_url.clone()
        },
        timeout: Duration::from_secs(service_config.timeout_secs),
    };

    tracing::debug!(provider = %provider, model = %settings.model, "building reasoning service");

    let service: Arc<dyn ReasoningService> = match provider {
        ReasoningProvider::OpenAi => Arc::new(OpenAiService::new(settings)?),
        ReasoningProvider::Claude => Arc::new(ClaudeService::new(settings)?),
    };
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("OpenAI".parse::<ReasoningProvider>(), Ok(ReasoningProvider::OpenAi));
        assert_eq!("claude".parse::<ReasoningProvider>(), Ok(ReasoningProvider::Claude));
        assert!("gemini".parse::<ReasoningProvider>().is_err());
    }

    #[test]
    fn provider_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReasoningProvider::OpenAi).unwrap(),
            "\"openai\""
        );
        assert_eq!(
            serde_json::to_string(&ReasoningProvider::Claude).unwrap(),
            "\"claude\""
        );
    }

    #[test]
    fn build_service_selects_configured_provider() {
        let mut config = AiServicesConfig::default();
        config.default_provider = "claude".into();
        config.claude.api_key = "sk-ant-test".into();

        let service = build_service(&config).unwrap();
        assert_eq!(service.name(), "claude");
    }

    #[test]
    fn build_service_rejects_unknown_provider() {
        let mut config = AiServicesConfig::default();
        config.default_provider = "gemini".into();
        assert!(matches!(
            build_service(&config),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
