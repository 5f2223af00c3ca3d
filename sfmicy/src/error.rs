//! Error types for the ICY stream probe

/// Result type alias for ICY probe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while probing an ICY stream
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Stream responded with a non-success status
    #[error("Stream responded with status: {0}")]
    BadStatus(reqwest::StatusCode),

    /// Stream ended before the metadata marker was reached
    #[error("Stream ended before the metadata marker")]
    StreamEnded,

    /// Scan walked past the metadata marker without finding it
    #[error("Scan budget exhausted after {consumed} bytes")]
    BudgetExceeded {
        /// Bytes consumed before giving up
        consumed: u64,
    },

    /// The whole probe took longer than the configured deadline
    #[error("Probe deadline elapsed")]
    DeadlineElapsed,

    /// Configuration error (from sfmconfig/anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
