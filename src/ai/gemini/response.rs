//! Maps a finished `generateContent` call onto exactly one [`DisplayEvent`].

use crate::models::DisplayEvent;
use crate::Result;
use serde_json::Value;

pub const INVALID_JSON: &str = "Invalid JSON received.";
pub const MISSING_CANDIDATES: &str = "No 'candidates' in response.";
pub const EMPTY_CANDIDATES: &str = "No response received.";

/// Turn a transport outcome into a display event.
///
/// Only the first part of the first candidate is ever surfaced. Missing or
/// mistyped fields below the candidate yield an empty reply.
pub fn parse_reply(outcome: Result<String>) -> DisplayEvent {
    let body = match outcome {
        Ok(body) => body,
        Err(e) => return DisplayEvent::Error(e.to_string()),
    };

    let object = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(object)) => object,
        _ => {
            tracing::warn!("Gemini response is not a JSON object: {}", body);
            return DisplayEvent::Error(INVALID_JSON.to_string());
        }
    };

    let Some(candidates) = object.get("candidates") else {
        tracing::warn!("Gemini response has no candidates: {}", body);
        return DisplayEvent::Error(MISSING_CANDIDATES.to_string());
    };

    let first = match candidates.as_array().and_then(|c| c.first()) {
        Some(first) => first,
        None => return DisplayEvent::Warning(EMPTY_CANDIDATES.to_string()),
    };

    let text = first
        .pointer("/content/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or_default();

    DisplayEvent::AssistantReply(text.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;

    fn parse(body: &str) -> DisplayEvent {
        parse_reply(Ok(body.to_string()))
    }

    #[test]
    fn test_reply_text_is_extracted() {
        assert_eq!(
            parse(r#"{"candidates":[{"content":{"parts":[{"text":"Hi there"}]}}]}"#),
            DisplayEvent::AssistantReply("Hi there".to_string(), None)
        );
    }

    #[test]
    fn test_only_first_candidate_and_part_surface() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"first"},{"text":"second part"}]}},
            {"content":{"parts":[{"text":"other candidate"}]}}
        ]}"#;
        assert_eq!(
            parse(body),
            DisplayEvent::AssistantReply("first".to_string(), None)
        );
    }

    #[test]
    fn test_empty_candidates_is_a_warning() {
        assert_eq!(
            parse(r#"{"candidates":[]}"#),
            DisplayEvent::Warning("No response received.".to_string())
        );
    }

    #[test]
    fn test_non_array_candidates_counts_as_empty() {
        assert_eq!(
            parse(r#"{"candidates":{"text":"nope"}}"#),
            DisplayEvent::Warning("No response received.".to_string())
        );
    }

    #[test]
    fn test_missing_candidates_is_an_error() {
        assert_eq!(
            parse(r#"{"foo":1}"#),
            DisplayEvent::Error("No 'candidates' in response.".to_string())
        );
    }

    #[test]
    fn test_non_json_and_non_object_bodies_are_invalid() {
        for body in ["not json", "", "[1,2,3]", "\"text\"", "42"] {
            assert_eq!(
                parse(body),
                DisplayEvent::Error("Invalid JSON received.".to_string()),
                "body: {:?}",
                body
            );
        }
    }

    #[test]
    fn test_partial_shapes_yield_empty_reply() {
        let bodies = [
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{}}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":7}]}}]}"#,
            r#"{"candidates":[null]}"#,
        ];
        for body in bodies {
            assert_eq!(
                parse(body),
                DisplayEvent::AssistantReply(String::new(), None),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_transport_error_is_surfaced_verbatim() {
        assert_eq!(
            parse_reply(Err(Error::Transport("Connection refused".to_string()))),
            DisplayEvent::Error("Connection refused".to_string())
        );
    }

    #[test]
    fn test_error_payload_from_api_is_protocol_error() {
        let body = r#"{"error":{"code":400,"message":"API key not valid."}}"#;
        assert_eq!(
            parse(body),
            DisplayEvent::Error("No 'candidates' in response.".to_string())
        );
    }
}
