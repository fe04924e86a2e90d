//! Provider boundary — the narrow seam every flow talks to.
//!
//! A provider takes a rendered prompt plus the schema the answer must follow and
//! returns the raw structured answer. Validating that answer is the caller's job.

use async_trait::async_trait;
use serde_json::Value;

use super::LlmError;

/// Describes the structured output a flow expects back from the provider.
///
/// `schema` is a JSON Schema object. Providers that support schema-constrained
/// output enforce it; the others only see it as a hint.
#[derive(Debug, Clone)]
pub struct OutputSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: Value,
}

/// A text-generation backend. `LlmClient` in production, scripted fakes in tests.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, schema: &OutputSchema) -> Result<Value, LlmError>;
}
