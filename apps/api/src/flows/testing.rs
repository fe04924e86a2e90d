//! In-memory providers for flow and handler tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm_client::{LlmError, OutputSchema, TextGenerator};

/// Replays a fixed script of answers, one per call, and records every prompt.
/// Calls past the end of the script fail with `EmptyContent`.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<Value, LlmError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<Value, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn answering(value: Value) -> Self {
        Self::new(vec![Ok(value)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for ScriptedProvider {
    async fn generate(&self, prompt: &str, _schema: &OutputSchema) -> Result<Value, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Always returns the same answer. Stands in for a seeded, deterministic model.
pub struct FixedProvider(pub Value);

#[async_trait]
impl TextGenerator for FixedProvider {
    async fn generate(&self, _prompt: &str, _schema: &OutputSchema) -> Result<Value, LlmError> {
        Ok(self.0.clone())
    }
}

/// Never answers.
pub struct StalledProvider;

#[async_trait]
impl TextGenerator for StalledProvider {
    async fn generate(&self, _prompt: &str, _schema: &OutputSchema) -> Result<Value, LlmError> {
        std::future::pending().await
    }
}
