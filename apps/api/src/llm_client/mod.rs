//! LLM Client — the single point of entry for all Claude API calls in CampusConnect.
//!
//! ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
//! Flows depend on the `TextGenerator` trait; `LlmClient` is its production implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;
pub mod provider;

pub use provider::{OutputSchema, TextGenerator};

use self::prompts::STRUCTURED_OUTPUT_SYSTEM;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Default model for all flows. Overridable through `LLM_MODEL`.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),
}

impl LlmError {
    /// Whether resending the identical request may succeed.
    ///
    /// Transport failures, timeouts, 408, 429 and 5xx are transient. Anything the
    /// provider rejected on its merits (auth, bad request) or a malformed body is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(e) => !e.is_decode() && !e.is_builder(),
            LlmError::Api { status, .. } => {
                *status == 408 || *status == 429 || (500..600).contains(status)
            }
            LlmError::Timeout(_) => true,
            LlmError::Parse(_) | LlmError::EmptyContent => false,
        }
    }

    /// Whether the failure happened after the provider answered, i.e. the answer
    /// itself was unusable rather than the call.
    pub fn is_malformed_output(&self) -> bool {
        match self {
            LlmError::Http(e) => e.is_decode(),
            LlmError::Parse(_) | LlmError::EmptyContent => true,
            LlmError::Api { .. } | LlmError::Timeout(_) => false,
        }
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<AnthropicTool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct AnthropicTool<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: &'a Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice<'a> {
    #[serde(rename = "type")]
    choice_type: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
    pub name: Option<String>,
    pub input: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }

    /// Extracts the input of the tool call named `tool_name`, if the model made one.
    pub fn tool_input(&self, tool_name: &str) -> Option<&Value> {
        self.content
            .iter()
            .filter(|b| b.block_type == "tool_use")
            .find(|b| b.name.as_deref() == Some(tool_name))
            .and_then(|b| b.input.as_ref())
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

/// The single LLM client used by all flows in CampusConnect.
/// Wraps the Anthropic Messages API with structured output helpers.
///
/// The client performs exactly one HTTP request per call. Retry policy belongs to
/// the caller (see `flows::policy`).
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
}

impl LlmClient {
    /// Builds a client whose transport gives up after `timeout`.
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Calls the LLM forcing a single tool call whose input schema is `schema`,
    /// and returns the tool input as raw JSON.
    ///
    /// If the model answers with text instead, the text is parsed as JSON.
    pub async fn call_structured(
        &self,
        prompt: &str,
        system: &str,
        schema: &OutputSchema,
    ) -> Result<Value, LlmError> {
        let response = self
            .send(AnthropicRequest {
                model: &self.model,
                max_tokens: MAX_TOKENS,
                system,
                messages: vec![AnthropicMessage {
                    role: "user",
                    content: prompt,
                }],
                tools: vec![AnthropicTool {
                    name: schema.name,
                    description: schema.description,
                    input_schema: &schema.schema,
                }],
                tool_choice: Some(ToolChoice {
                    choice_type: "tool",
                    name: schema.name,
                }),
            })
            .await?;

        if let Some(input) = response.tool_input(schema.name) {
            return Ok(input.clone());
        }

        warn!(
            "LLM skipped the '{}' tool call, falling back to text output",
            schema.name
        );
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        serde_json::from_str(strip_json_fences(text)).map_err(LlmError::Parse)
    }

    async fn send(&self, request_body: AnthropicRequest<'_>) -> Result<LlmResponse, LlmError> {
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 || status.is_server_error() {
                warn!("LLM API returned {}: {}", status, body);
            }
            // Try to parse error message
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let llm_response = parse_response(&body)?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str, schema: &OutputSchema) -> Result<Value, LlmError> {
        self.call_structured(prompt, STRUCTURED_OUTPUT_SYSTEM, schema)
            .await
    }
}

/// Parses a successful Messages API body. A body that is not a valid Messages
/// payload is malformed output, not a transport failure.
fn parse_response(body: &str) -> Result<LlmResponse, LlmError> {
    serde_json::from_str(body).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
