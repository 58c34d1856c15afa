//! Shared client for OpenAI-compatible chat-completion endpoints.
//!
//! All three supported providers speak the same wire shape: a JSON
//! POST with `model`, `messages`, `max_tokens` and `temperature`, and
//! a response whose first choice carries the reply text.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, Result};
use crate::traits::ChatMessage;

/// Token budget for one completion.
const MAX_TOKENS: u32 = 1024;

/// Sampling temperature used for every provider call.
const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Posts a chat completion and extracts the first choice's text.
///
/// Any non-success status becomes [`ProviderError::Status`] with the
/// body attached; a body without choices becomes
/// [`ProviderError::Malformed`].
pub async fn post_chat(
    client: &reqwest::Client,
    url: &str,
    bearer_token: &str,
    model: &str,
    messages: &[ChatMessage],
) -> Result<String> {
    debug!(url, model, count = messages.len(), "Sending provider request");

    let response = client
        .post(url)
        .bearer_auth(bearer_token)
        .json(&ChatRequest {
            model,
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let parsed: ChatResponse = response
        .json()
        .await
        .map_err(|e| ProviderError::Malformed(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| ProviderError::Malformed("response contained no choices".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let messages = [ChatMessage::user("hi")];
        let request = ChatRequest {
            model: "test-model",
            messages: &messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hello");
    }

    #[test]
    fn test_response_without_choices() {
        let body = r#"{"choices":[]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
