//! Provider error types.

use thiserror::Error;

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Failures of the content provider boundary.
///
/// Every variant means the same thing to callers: no usable content was
/// produced, and the call will not be retried automatically.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key configured.
    #[error("no API key: set provider.api_key or the GEMINI_API_KEY environment variable")]
    MissingApiKey,

    /// Transport-level failure.
    #[error("request to content provider failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the provider.
    #[error("content provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response carried no generated content.
    #[error("content provider returned an empty response")]
    EmptyResponse,

    /// The generated content was not the JSON we asked for.
    #[error("content provider returned malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The generated document violates a site invariant.
    #[error("generated site is invalid: {0}")]
    InvalidSite(#[from] seoforge_core::SiteError),

    /// The article batch had the wrong size.
    #[error("expected {expected} articles, got {actual}")]
    WrongArticleCount { expected: usize, actual: usize },
}
