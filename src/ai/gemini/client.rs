use super::types::GenerateContentRequest;
use crate::ai::ChatService;
use crate::models::Config;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::Duration;

/// Gemini REST transport for `generateContent`.
///
/// Every call is independent: no retry, no streaming, and no timeout unless
/// one is configured.
#[derive(Clone)]
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-2.0-flash`);
    /// a leading `models/` is stripped.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: crate::models::DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(
            Self::new_with_client(config.api_key.clone(), config.model.clone(), client)
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout),
        )
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Endpoint URL without the key; the key is attached as a query parameter per request.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Render a reqwest error with its source chain, minus the URL (which carries the key).
fn transport_error(e: reqwest::Error) -> Error {
    let e = e.without_url();
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    Error::Transport(message)
}

#[async_trait]
impl ChatService for GeminiHttpClient {
    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<String> {
        tracing::debug!("Sending generateContent request to {}", self.endpoint());

        let mut builder = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            let err = transport_error(e);
            tracing::error!("Failed to send request to Gemini: {}", err);
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Gemini returned status {}; parsing body anyway", status);
        }

        response.text().await.map_err(|e| {
            let err = transport_error(e);
            tracing::error!("Failed to read Gemini response body: {}", err);
            err
        })
    }
}
