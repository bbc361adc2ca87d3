//! Error types for the raw encoding engine

use thiserror::Error;

/// Raw encoding error types
///
/// Encoders fail fast: on error, no bytes are produced.
#[derive(Debug, Error)]
pub enum RawError {
    /// Caller-correctable parameter problem (blank logo id, size ceiling, ...)
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Requested language/variant combination has no implementation.
    ///
    /// Surfaced as a skip/fallback signal - callers may have alternative
    /// languages to try.
    #[error("Unsupported configuration: {0}")]
    Unsupported(String),

    /// Pixel source inconsistent with its declared dimensions, or otherwise
    /// unusable input. Treated as an upstream programming error, not retried.
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// Result type for raw encoding operations
pub type RawResult<T> = Result<T, RawError>;
