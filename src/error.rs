// src/error.rs
// Error types for the fallible edges of the responder (config, sources, backends)

use thiserror::Error;

/// Main error type for the review-responder library.
///
/// Nothing in here ever escapes `ResponseGenerator::generate_response`; these
/// errors surface only from configuration loading, review sources and the
/// completion backend, where the caller (or the drafter) decides what to do.
#[derive(Error, Debug)]
pub enum ResponderError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion backend error: {0}")]
    Backend(String),

    #[error("review source error: {0}")]
    Source(String),
}

/// Convenience type alias for Result using ResponderError
pub type Result<T> = std::result::Result<T, ResponderError>;
