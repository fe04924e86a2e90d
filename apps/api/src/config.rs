use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::flows::confidentiality::ConfidentialityPolicy;
use crate::flows::policy::{CallOptions, RetryPolicy};
use crate::llm_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub llm_max_retries: u32,
    pub llm_retry_base_ms: u64,
    pub confidentiality_policy: ConfidentialityPolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_timeout_secs: u64 = parse_or("LLM_TIMEOUT_SECS", env("LLM_TIMEOUT_SECS"), 60)?;
        if llm_timeout_secs == 0 {
            return Err(anyhow!("LLM_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_model: env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_timeout_secs,
            llm_max_retries: parse_or("LLM_MAX_RETRIES", env("LLM_MAX_RETRIES"), 0)?,
            llm_retry_base_ms: parse_or("LLM_RETRY_BASE_MS", env("LLM_RETRY_BASE_MS"), 1000)?,
            confidentiality_policy: parse_or(
                "CONFIDENTIALITY_POLICY",
                env("CONFIDENTIALITY_POLICY"),
                ConfidentialityPolicy::default(),
            )?,
            port: parse_or("PORT", env("PORT"), 8080)?,
            rust_log: env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Timeout and retry policy applied to every provider call.
    pub fn call_options(&self) -> CallOptions {
        CallOptions {
            timeout: Duration::from_secs(self.llm_timeout_secs),
            retry: RetryPolicy {
                max_retries: self.llm_max_retries,
                base_delay: Duration::from_millis(self.llm_retry_base_ms),
            },
        }
    }
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses `raw` if present and non-blank, else falls back to `default`.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has invalid value '{value}': {e}")),
    }
}
