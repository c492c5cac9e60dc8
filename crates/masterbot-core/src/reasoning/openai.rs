//! OpenAI chat-completions provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::client::{self, ProviderSettings};
use super::ReasoningService;
use crate::error::ReasoningError;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

pub struct OpenAiService {
    http_client: Client,
    settings: ProviderSettings,
}

impl OpenAiService {
    pub fn new(settings: ProviderSettings) -> Result<Self, ReasoningError> {
        if settings.api_key.is_empty() {
            return Err(ReasoningError::MissingApiKey {
                provider: "openai".into(),
            });
        }
        Ok(Self {
            http_client: client::build_client(settings.timeout)?,
            settings,
        })
    }
}

#[async_trait]
impl ReasoningService for OpenAiService {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ReasoningError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let request = self
            .http_client
            .post(client::endpoint(&self.settings.base_url, "/chat/completions"))
            .bearer_auth(&self.settings.api_key)
            .json(&body);

        let resp: ChatResponse = client::send_json(request).await?;
        resp.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ReasoningError::MalformedResponse("response has no choices".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings(base_url: String) -> ProviderSettings {
        ProviderSettings {
            api_key: "sk-test".into(),
            model: OPENAI_DEFAULT_MODEL.into(),
            max_tokens: 1000,
            temperature: 0.7,
            base_url,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn rejects_empty_api_key() {
        let mut s = settings(OPENAI_BASE_URL.into());
        s.api_key.clear();
        assert!(matches!(
            OpenAiService::new(s),
            Err(ReasoningError::MissingApiKey { .. })
        ));
    }

    #[tokio::test]
    async fn extracts_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "hello"}],
                "max_tokens": 1000
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Go to Jazz Night."}}]}"#)
            .create_async()
            .await;

        let service = OpenAiService::new(settings(server.url())).unwrap();
        let text = service.generate("hello").await.unwrap();

        assert_eq!(text, "Go to Jazz Night.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_error_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"bad key"}}"#)
            .create_async()
            .await;

        let service = OpenAiService::new(settings(server.url())).unwrap();
        match service.generate("hello").await {
            Err(ReasoningError::Http { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("bad key"));
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let service = OpenAiService::new(settings(server.url())).unwrap();
        assert!(matches!(
            service.generate("hello").await,
            Err(ReasoningError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn error_object_in_ok_body_is_provider_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"error":{"message":"model overloaded","type":"server_error"}}"#)
            .create_async()
            .await;

        let service = OpenAiService::new(settings(server.url())).unwrap();
        match service.generate("hello").await {
            Err(ReasoningError::Provider(message)) => assert_eq!(message, "model overloaded"),
            other => panic!("expected provider failure, got {other:?}"),
        }
    }
}
