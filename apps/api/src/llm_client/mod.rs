/// LLM Client — the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call a generation API directly.
/// Handlers and the interview pipeline go through `GenerationClient`, which owns
/// the rate-limit backoff policy. Provider wire formats live in the backends.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, warn};

pub mod anthropic;
pub mod huggingface;

pub use anthropic::AnthropicBackend;
pub use huggingface::HuggingFaceBackend;

/// Request timeout applied to the shared HTTP client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A failure from a single call to a generation backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl BackendError {
    /// Only HTTP 429 drives the retry policy. Everything else fails fast.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, BackendError::Status { status: 429, .. })
    }
}

/// Failure of a whole generation call, after the retry policy has run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("Generation failed: {0}")]
    Failed(String),
}

/// A text-generation service: one prompt in, raw generated text out.
///
/// Carried by `GenerationClient` as `Arc<dyn TextGenerator>` so tests can
/// substitute a scripted backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

/// Exponential backoff for rate-limited calls.
///
/// The wait after failed attempt `n` (0-based) is `2^n × base_delay`.
/// `max_attempts` counts every call, including the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub base_delay: Duration,
    pub max_attempts: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(2000),
            max_attempts: 5,
        }
    }
}

impl BackoffPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(31))
    }
}

/// The generation client used by the interview pipeline.
/// Wraps a backend with rate-limit retry and failure classification.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn TextGenerator>,
    policy: BackoffPolicy,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn TextGenerator>, policy: BackoffPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn policy(&self) -> BackoffPolicy {
        self.policy
    }

    /// Calls the backend, retrying only on 429 with exponential backoff.
    /// Attempts run strictly one after another.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut attempt: u32 = 0;

        loop {
            match self.backend.generate(prompt).await {
                Ok(text) => {
                    debug!(
                        backend = self.backend.name(),
                        attempt = attempt + 1,
                        chars = text.len(),
                        "Generation call succeeded"
                    );
                    return Ok(text);
                }
                Err(e) if e.is_rate_limited() => {
                    let attempts = attempt + 1;
                    if attempts >= self.policy.max_attempts {
                        warn!(
                            backend = self.backend.name(),
                            attempts, "Rate limit persisted, giving up"
                        );
                        return Err(GenerationError::RateLimited { attempts });
                    }

                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        "Rate limit hit on attempt {}/{}, retrying in {}ms...",
                        attempts,
                        self.policy.max_attempts,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(backend = self.backend.name(), "Generation call failed: {e}");
                    return Err(GenerationError::Failed(e.to_string()));
                }
            }
        }
    }
}

/// Builds the shared HTTP client handed to every backend.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()
}

/// Truncates a provider error body for logs and error messages.
pub(crate) fn summarize_body(body: &str) -> String {
    const MAX: usize = 500;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        let mut s: String = body.chars().take(MAX).collect();
        s.push('…');
        s
    }
}
