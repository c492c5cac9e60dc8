//! HTTP plumbing shared by the hosted providers.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::error::ReasoningError;

/// Connection settings for one hosted provider.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub base_url: String,
    pub timeout: Duration,
}

pub(super) fn build_client(timeout: Duration) -> Result<Client, ReasoningError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

pub(super) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Send `request` and decode a JSON body of type `T`.
///
/// Non-2xx statuses become [`ReasoningError::Http`]. A 2xx body carrying an
/// `{"error": {"message": ..}}` object becomes [`ReasoningError::Provider`];
/// anything else that does not decode as `T` becomes
/// [`ReasoningError::MalformedResponse`].
pub(super) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, ReasoningError> {
    let resp = request.send().await?;
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(ReasoningError::Http {
            status: status.as_u16(),
            body,
        });
    }

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
        return Err(ReasoningError::Provider(envelope.error.message));
    }

    serde_json::from_str(&body).map_err(|e| ReasoningError::MalformedResponse(e.to_string()))
}
