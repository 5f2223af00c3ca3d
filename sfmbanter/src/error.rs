//! Error types for completion dispatch and script generation

/// Result type alias for banter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when generating a script
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend rejected the request with HTTP 429
    #[error("Completion backend rate limited")]
    RateLimited,

    /// Backend returned a non-success status
    #[error("Completion backend returned status {0}")]
    BadStatus(reqwest::StatusCode),

    /// Backend answered without any choice carrying a message
    #[error("Completion response contained no choices")]
    NoChoices,

    /// No presenter in the content store matched the requested names
    #[error("Unknown presenters: {0}")]
    UnknownPresenters(String),

    /// Every configured model was tried and none raised an error of
    /// its own (empty model list, or only empty answers)
    #[error("All AI models busy.")]
    AllBusy,

    /// Voice profile lookup failed
    #[error("Content store error: {0}")]
    Content(#[from] sfmcontent::Error),

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

    /// True when the failure should be presented as a rate-limit
    /// condition rather than a generic backend failure
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}
