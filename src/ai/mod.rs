//! Generative-language API integration
//!
//! Provides the transport seam the conversation exchange talks to, the
//! Gemini `generateContent` implementation of it, and an in-memory mock.

pub mod gemini;
pub mod mock;

pub use gemini::{build_request, parse_reply, GeminiHttpClient, GenerateContentRequest};
pub use mock::MockChatClient;

use crate::Result;
use async_trait::async_trait;

/// Sends one request and hands back the raw response body.
///
/// Non-success HTTP statuses are not errors at this layer; only failures to
/// complete the exchange at all surface as `Err`.
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<String>;
}
