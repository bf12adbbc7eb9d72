//! Error types for a single upload attempt and for the caller's fail policy.

use std::path::PathBuf;
use thiserror::Error;

/// Error returned by a transport when no HTTP status could be obtained.
/// Always retryable; the executor logs it and tries again.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection refused, DNS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Form construction failed before anything was sent.
    #[error("building multipart form: {0}")]
    Form(#[from] curl::FormError),
    /// Mapping file could not be read when the request was sent.
    #[error("mapping file {}: {source}", .path.display())]
    MappingFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The exchange completed but the response was unusable.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Hard failure raised by the caller when `fail_on_error` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Precondition failed (empty API key); nothing was sent.
    #[error("invalid parameters")]
    InvalidParameters,
    /// Every attempt failed.
    #[error("upload did not succeed")]
    UploadFailed,
}
