//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query parameters for the nearby-stations endpoint.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    /// Query point latitude
    pub lat: f64,

    /// Query point longitude
    pub lon: f64,

    /// Search radius in km (default 10)
    pub radius: Option<f64>,

    /// Whether to include Open Charge Map results (default true)
    pub use_directory: Option<bool>,

    /// Number of nearest stations to return (default 5)
    pub limit: Option<usize>,
}

/// Query parameters for the station list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Maximum number of stations to return (default 1000)
    pub limit: Option<usize>,
}

/// Query parameters for the station search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search term for station name or location
    pub query: String,

    /// Maximum number of results (default 20)
    pub limit: Option<usize>,
}

/// Response for the station count endpoint.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
    pub source: &'static str,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
