//! Wire types for OpenAI-style chat completion backends
//!
//! Only the fields the dispatcher reads are modelled; backends attach
//! plenty more (ids, usage counters) that is ignored on the way in.

use serde::{Deserialize, Serialize};

/// Default sampling temperature for script generation
pub const DEFAULT_TEMPERATURE: f32 = 0.85;

/// Default completion length cap, in tokens
pub const DEFAULT_MAX_TOKENS: u32 = 250;

/// A single chat message on the request side
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Builds a system role message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Builds a user role message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Sampling parameters shared by every attempt in a dispatch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Chat completion request payload, one per attempted model
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>, params: &SamplingParams) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

/// Chat completion response envelope
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One generated choice
///
/// A missing message is a malformed answer; a `null` content inside a
/// present message is a legal empty answer.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

/// The message carried by a choice
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = ChatRequest::new(
            "meta-llama/llama-3.3-70b-instruct:free",
            vec![ChatMessage::system("Be brief."), ChatMessage::user("Action!")],
            &SamplingParams::default(),
        );

        // Round-trip through the serialized bytes, the same path the
        // HTTP client takes.
        let wire = serde_json::to_string(&request).unwrap();
        let value: serde_json::Value = serde_json::from_str(&wire).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "meta-llama/llama-3.3-70b-instruct:free",
                "messages": [
                    { "role": "system", "content": "Be brief." },
                    { "role": "user", "content": "Action!" }
                ],
                "temperature": 0.85,
                "max_tokens": 250
            })
        );
    }

    #[test]
    fn test_response_with_content() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "gen-123",
            "choices": [
                { "message": { "role": "assistant", "content": "Vera: what a track." } }
            ],
            "usage": { "total_tokens": 40 }
        }))
        .unwrap();

        let content = response.choices[0]
            .message
            .as_ref()
            .and_then(|m| m.content.as_deref());
        assert_eq!(content, Some("Vera: what a track."));
    }

    #[test]
    fn test_response_null_content_is_legal() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [ { "message": { "role": "assistant", "content": null } } ]
        }))
        .unwrap();

        assert!(response.choices[0].message.is_some());
        assert!(response.choices[0]
            .message
            .as_ref()
            .and_then(|m| m.content.as_ref())
            .is_none());
    }

    #[test]
    fn test_response_without_choices() {
        let response: ChatResponse = serde_json::from_value(json!({ "error": "oops" })).unwrap();
        assert!(response.choices.is_empty());
    }
}
