//! Anthropic messages provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::client::{self, ProviderSettings};
use super::ReasoningService;
use crate::error::ReasoningError;

pub const CLAUDE_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const CLAUDE_DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

pub struct ClaudeService {
    http_client: Client,
    settings: ProviderSettings,
}

impl ClaudeService {
    pub fn new(settings: ProviderSettings) -> Result<Self, ReasoningError> {
        if settings.api_key.is_empty() {
            return Err(ReasoningError::MissingApiKey {
                provider: "claude".into(),
            });
        }
        Ok(Self {
            http_client: client::build_client(settings.timeout)?,
            settings,
        })
    }
}

#[async_trait]
impl ReasoningService for ClaudeService {
    fn name(&self) -> &str {
        "claude"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ReasoningError> {
        let body = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let request = self
            .http_client
            .post(client::endpoint(&self.settings.base_url, "/messages"))
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let resp: MessagesResponse = client::send_json(request).await?;
        resp.content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| ReasoningError::MalformedResponse("response has no text block".into()))
    }
}
