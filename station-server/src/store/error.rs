//! Station store error types.

/// Errors from the authoritative station store.
///
/// Every variant means "the store could not answer" and surfaces to callers
/// as service-unavailable. An empty result set is *not* an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check SNOWFLAKE_TOKEN")]
    Unauthorized,

    /// Store returned an error status
    #[error("store error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("malformed store response: {message}")]
    Response { message: String },

    /// Required connection settings are missing
    #[error("store not configured: {0}")]
    NotConfigured(String),
}
