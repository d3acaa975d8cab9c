//! LLM provider trait and completion types

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A prompt with the instruction and user-data sections kept separate, so
/// user-controlled fields are never interpreted as instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Prompt {
        Prompt {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Configuration for a single completion call
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model_id: String::new(),
            max_tokens: 400,
            temperature: 0.2,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Result of a completion call
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub model_id: String,
    pub tokens_used: Option<u32>,
}

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion with the given configuration
    async fn complete(&self, prompt: &Prompt, config: &CompletionConfig) -> Result<Completion>;

    /// The model this provider is configured to use
    fn model_id(&self) -> &str;
}
