use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

use crate::interview::questions::BlankLinePolicy;

const DEFAULT_HF_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/EleutherAI/gpt-neo-2.7B";
const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Which text-generation service backs the question generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationProvider {
    HuggingFace,
    Anthropic,
}

impl FromStr for GenerationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(anyhow!(
                "unknown GENERATION_PROVIDER '{other}' (expected 'huggingface' or 'anthropic')"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub provider: GenerationProvider,
    /// API key for the selected provider.
    pub generation_api_key: String,
    /// Endpoint for the selected provider.
    pub generation_url: String,
    pub base_delay: Duration,
    pub max_attempts: u32,
    pub blank_lines: BlankLinePolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider = optional_env("GENERATION_PROVIDER")
            .map(|v| v.parse::<GenerationProvider>())
            .transpose()?
            .unwrap_or(GenerationProvider::HuggingFace);

        let (generation_api_key, generation_url) = match provider {
            GenerationProvider::HuggingFace => (
                require_env("HF_API_KEY")?,
                optional_env("HF_MODEL_URL").unwrap_or_else(|| DEFAULT_HF_MODEL_URL.to_string()),
            ),
            GenerationProvider::Anthropic => (
                require_env("ANTHROPIC_API_KEY")?,
                optional_env("ANTHROPIC_API_URL")
                    .unwrap_or_else(|| DEFAULT_ANTHROPIC_API_URL.to_string()),
            ),
        };

        let base_delay_ms = parse_env("GENERATION_BASE_DELAY_MS", 2000u64)?;
        let max_attempts = parse_env("GENERATION_MAX_ATTEMPTS", 5u32)?;
        if max_attempts == 0 {
            bail!("GENERATION_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            provider,
            generation_api_key,
            generation_url,
            base_delay: Duration::from_millis(base_delay_ms),
            max_attempts,
            blank_lines: optional_env("QUESTION_BLANK_LINES")
                .map(|v| v.parse::<BlankLinePolicy>())
                .transpose()?
                .unwrap_or_default(),
            port: parse_env("PORT", 3000u16)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{key} must be a valid number: {e}")),
        None => Ok(default),
    }
}
