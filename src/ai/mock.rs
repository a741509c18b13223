use super::{ChatService, GenerateContentRequest};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
struct MockOutcome {
    result: std::result::Result<String, String>,
    delay: Option<Duration>,
}

/// Scripted [`ChatService`] that records every request it receives.
///
/// Outcomes are consumed in call order; once exhausted, a fixed reply body
/// is returned.
#[derive(Clone, Default)]
pub struct MockChatClient {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    requests: Arc<Mutex<Vec<GenerateContentRequest>>>,
}

impl MockChatClient {
    pub const DEFAULT_REPLY: &'static str = "Mock reply";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, body: impl Into<String>) -> Self {
        self.push(Ok(body.into()), None)
    }

    /// Reply body with `text` as the first candidate's first part.
    pub fn with_reply(self, text: &str) -> Self {
        self.with_body(reply_body(text))
    }

    pub fn with_delayed_reply(self, text: &str, delay: Duration) -> Self {
        self.push(Ok(reply_body(text)), Some(delay))
    }

    pub fn with_transport_error(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()), None)
    }

    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn push(self, result: std::result::Result<String, String>, delay: Option<Duration>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome { result, delay });
        self
    }
}

/// `generateContent` body whose first candidate's first part is `text`.
pub fn reply_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    })
    .to_string()
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());

        let outcome = self.outcomes.lock().unwrap().pop_front();
        let outcome = outcome.unwrap_or_else(|| MockOutcome {
            result: Ok(reply_body(Self::DEFAULT_REPLY)),
            delay: None,
        });

        if let Some(delay) = outcome.delay {
            tokio::time::sleep(delay).await;
        }

        outcome.result.map_err(Error::Transport)
    }
}
