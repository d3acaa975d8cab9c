//! Error types shared across the RCE crates

use thiserror::Error;

/// Result alias used throughout the RCE system
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the RCE system
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("LLM provider error: {0}")]
    LlmProvider(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Project corpus unavailable: {0}")]
    CorpusUnavailable(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
