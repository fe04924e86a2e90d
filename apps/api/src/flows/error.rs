use thiserror::Error;

use crate::llm_client::LlmError;

/// Failure of a generation flow. Surfaced to the caller unchanged; a failed call
/// never returns a partial result.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The caller's request failed local checks. Never retried.
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// The text-generation call itself failed.
    #[error("Provider error: {message}")]
    Provider { message: String, retryable: bool },

    /// The provider answered, but the answer does not fit the output contract.
    #[error("Output schema error: {0}")]
    OutputSchema(String),

    /// Generated content breaks a business rule that could not be repaired locally.
    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl FlowError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        FlowError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FlowError::Provider {
                retryable: true,
                ..
            }
        )
    }
}

impl From<LlmError> for FlowError {
    fn from(e: LlmError) -> Self {
        if e.is_malformed_output() {
            FlowError::OutputSchema(e.to_string())
        } else {
            FlowError::Provider {
                retryable: e.is_retryable(),
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let e = FlowError::validation("existingSkills[0].name", "must not be empty");
        assert_eq!(
            e.to_string(),
            "Validation error: existingSkills[0].name: must not be empty"
        );
        assert!(!e.is_retryable());
    }

    #[test]
    fn test_llm_timeout_maps_to_retryable_provider_error() {
        let e = FlowError::from(LlmError::Timeout(Duration::from_secs(30)));
        assert!(matches!(e, FlowError::Provider { retryable: true, .. }));
    }

    #[test]
    fn test_llm_client_error_maps_to_non_retryable_provider_error() {
        let e = FlowError::from(LlmError::Api {
            status: 400,
            message: "bad request".to_string(),
        });
        assert!(matches!(e, FlowError::Provider { retryable: false, .. }));
    }

    #[test]
    fn test_unparseable_provider_answer_maps_to_output_schema_error() {
        let parse_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(matches!(
            FlowError::from(LlmError::Parse(parse_error)),
            FlowError::OutputSchema(_)
        ));
        assert!(matches!(
            FlowError::from(LlmError::EmptyContent),
            FlowError::OutputSchema(_)
        ));
    }
}
