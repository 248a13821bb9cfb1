//! Error types shared across the crate.

use std::time::Duration;
use thiserror::Error;

/// Why a content fetch produced no payload. Callers treat every variant
/// the same way; the distinction exists for logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no API key configured for the content provider")]
    MissingApiKey,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider returned an empty response")]
    EmptyResponse,
    #[error("response does not match the content schema: {0}")]
    Schema(#[from] serde_json::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("content provider unavailable: {0}")]
    Unavailable(String),
}

/// Failures reading or writing durable key storage.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not persist temporary file: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error("could not encode value: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage is read-only")]
    ReadOnly,
}
