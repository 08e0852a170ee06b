//! Error types for card downloads
//!
//! Transport and HTTP status failures are transient from the downloader's
//! point of view and get retried. Everything else is handed straight back to
//! the caller.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors raised while resolving and downloading a single card image
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The host answered with a non-success status (404 included)
    #[error("HTTP {status} for URL: {url}")]
    Status { status: StatusCode, url: String },

    /// The candidate list was empty
    #[error("no candidates")]
    NoCandidates,

    /// Creating the destination directory or writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Returns true if another attempt against the same URL may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            // Commons answers 404 for a missing file and 429/5xx when busy;
            // both get the same fixed retry budget.
            FetchError::Status { .. } => true,
            FetchError::NoCandidates => false,
            FetchError::Io(_) => false,
        }
    }
}
