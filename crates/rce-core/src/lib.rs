//! Core traits and types for RCE (Renovation Cost Estimator)
//!
//! This crate defines the fundamental traits and types used across the RCE
//! system. It provides capability-facing interfaces for LLM providers,
//! record retrievers, and evaluation scorers, making the system
//! test-friendly and extensible.

pub mod error;
pub mod llm;
pub mod request;
pub mod retriever;
pub mod scorer;
pub mod types;

pub use error::{Error, Result};
pub use llm::{Completion, CompletionConfig, LlmProvider, Prompt};
pub use request::{EstimateInput, EstimateRequest};
pub use retriever::{DEFAULT_TOP_K, RecordFilter, Retriever};
pub use scorer::EvaluationScorer;
pub use types::*;
