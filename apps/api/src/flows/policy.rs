//! Call policy — the mandatory timeout and the opt-in retry around every provider call.
//!
//! Retries are off by default. When enabled they apply only to errors flagged
//! retryable, with exponential backoff: base, 2×base, 4×base, ...

use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use crate::flows::FlowError;
use crate::llm_client::{LlmError, OutputSchema, TextGenerator};

/// Default ceiling on a single provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);
/// Caps the backoff exponent so the delay cannot overflow.
const MAX_BACKOFF_SHIFT: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one. 0 disables retrying.
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(MAX_BACKOFF_SHIFT);
        self.base_delay.saturating_mul(1u32 << shift)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Calls the provider under `options`.
///
/// Dropping the returned future drops the in-flight provider call with it.
pub async fn invoke_provider(
    provider: &dyn TextGenerator,
    prompt: &str,
    schema: &OutputSchema,
    options: &CallOptions,
) -> Result<Value, FlowError> {
    let mut attempt = 0;

    loop {
        let outcome =
            match tokio::time::timeout(options.timeout, provider.generate(prompt, schema)).await {
                Ok(result) => result.map_err(FlowError::from),
                Err(_) => Err(FlowError::from(LlmError::Timeout(options.timeout))),
            };

        match outcome {
            Err(e) if e.is_retryable() && attempt < options.retry.max_retries => {
                attempt += 1;
                let delay = options.retry.delay_for(attempt);
                warn!(
                    "Provider call for '{}' failed ({e}), retry {}/{} after {}ms...",
                    schema.name,
                    attempt,
                    options.retry.max_retries,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
            other => return other,
        }
    }
}
