//! Anthropic Messages API backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{summarize_body, BackendError, TextGenerator};
use crate::interview::prompts::QUESTION_SYSTEM;

const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for question generation when Anthropic is the provider.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    /// Extracts the text content from the first text block.
    fn into_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text)
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

pub struct AnthropicBackend {
    client: Client,
    api_url: String,
    api_key: String,
}

impl AnthropicBackend {
    pub fn new(client: Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl TextGenerator for AnthropicBackend {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: QUESTION_SYSTEM,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| summarize_body(&body));
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)?;
        debug!(
            "Anthropic call succeeded: input_tokens={}, output_tokens={}",
            parsed.usage.input_tokens, parsed.usage.output_tokens
        );

        parsed.into_text().ok_or(BackendError::EmptyContent)
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_first_text_block() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "sk-test")
            .match_header("anthropic-version", ANTHROPIC_VERSION)
            .with_status(200)
            .with_body(
                r#"{
                    "content": [
                        {"type": "thinking", "text": null},
                        {"type": "text", "text": "Q1\nQ2"}
                    ],
                    "usage": {"input_tokens": 12, "output_tokens": 4}
                }"#,
            )
            .create_async()
            .await;

        let backend = AnthropicBackend::new(
            Client::new(),
            format!("{}/v1/messages", server.url()),
            "sk-test".to_string(),
        );
        let text = backend.generate("prompt").await.unwrap();

        assert_eq!(text, "Q1\nQ2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_message_is_extracted_from_error_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(429)
            .with_body(r#"{"type":"error","error":{"type":"rate_limit_error","message":"slow down"}}"#)
            .create_async()
            .await;

        let backend = AnthropicBackend::new(
            Client::new(),
            format!("{}/v1/messages", server.url()),
            "sk-test".to_string(),
        );
        let err = backend.generate("prompt").await.unwrap_err();

        assert!(err.is_rate_limited());
        assert!(err.to_string().contains("slow down"));
    }

    #[test]
    fn test_response_without_text_block_has_no_text() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content": [], "usage": {"input_tokens": 1, "output_tokens": 0}}"#,
        )
        .unwrap();
        assert!(response.into_text().is_none());
    }
}
