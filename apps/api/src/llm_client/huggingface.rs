//! Hugging Face Inference API backend (text-generation task).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{summarize_body, BackendError, TextGenerator};

const MAX_NEW_TOKENS: u32 = 256;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    /// Without this the endpoint echoes the prompt ahead of the continuation.
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}

pub struct HuggingFaceBackend {
    client: Client,
    model_url: String,
    api_key: String,
}

impl HuggingFaceBackend {
    pub fn new(client: Client, model_url: String, api_key: String) -> Self {
        Self {
            client,
            model_url,
            api_key,
        }
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceBackend {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(&self.model_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<InferenceError>(&text)
                .map(|e| e.error)
                .unwrap_or_else(|_| summarize_body(&text));
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let generations: Vec<GeneratedText> = serde_json::from_str(&text)?;
        generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or(BackendError::EmptyContent)
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }
}
