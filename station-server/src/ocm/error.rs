//! OCM client error types.

/// Errors from the Open Charge Map HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum OcmError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("OCM API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response body
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// No API key configured; no network call was made
    #[error("OCM_API_KEY not set")]
    MissingApiKey,
}
