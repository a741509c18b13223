//! Gemini `generateContent` request payload types.

use serde::{Deserialize, Serialize};

/// Top-level `generateContent` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

/// One conversational turn made of ordered text parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl GenerateContentRequest {
    /// Text of the final part, which is always the user's message.
    pub fn user_message(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|c| c.parts.last())
            .map(|p| p.text.as_str())
    }

    /// Text of the leading system part, if the request carries one.
    pub fn system_prompt(&self) -> Option<&str> {
        self.contents
            .first()
            .filter(|c| c.parts.len() > 1)
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
    }
}
