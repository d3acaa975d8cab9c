//! OpenAI integration for the renovation cost estimator
//!
//! This crate provides the OpenAI implementation of the LlmProvider trait.

mod client;
mod config;


pub use client::OpenAiClient;
pub use config::OpenAiConfig;

// Re-export core types for convenience
pub use rce_core::{Completion, CompletionConfig, Error, LlmProvider, Prompt, Result};
