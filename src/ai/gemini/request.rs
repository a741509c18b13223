use super::types::{Content, GenerateContentRequest, Part};
use crate::models::{Persona, PromptMode};

/// Build the single-turn request for `raw` as typed by the user.
///
/// Returns `None` when the message is blank after trimming; no request is
/// sent for it.
pub fn build_request(
    persona: Persona,
    mode: PromptMode,
    raw: &str,
) -> Option<GenerateContentRequest> {
    let message = raw.trim();
    if message.is_empty() {
        return None;
    }

    let mut parts = Vec::with_capacity(2);
    if mode == PromptMode::Inline {
        parts.push(Part::text(persona.system_prompt()));
    }
    parts.push(Part::text(message));

    Some(GenerateContentRequest {
        contents: vec![Content { parts }],
    })
}
