//! Error types for whatsapp-cloud-channel

use thiserror::Error;

/// Adapter error type
#[derive(Debug, Error)]
pub enum Error {
    /// Inbound webhook payload is missing a required field or has an
    /// unrecognized message shape. No message was extracted.
    #[error("invalid webhook payload: {0}")]
    Validation(String),

    /// HTTP-layer failure on the outbound path (network, timeout, non-2xx
    /// status). Passed through from the HTTP client unmodified.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Configuration error (missing or malformed settings)
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
