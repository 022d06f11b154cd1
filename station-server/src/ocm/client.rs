//! Open Charge Map HTTP client.

use tracing::{debug, warn};

use crate::domain::StationCandidate;

use super::convert::convert_poi;
use super::error::OcmError;
use super::types::Poi;

/// Default base URL for the Open Charge Map API.
const DEFAULT_BASE_URL: &str = "https://api.openchargemap.io/v3";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default cap on results requested from OCM.
const DEFAULT_MAX_RESULTS: u32 = 50;

/// Configuration for the OCM client.
#[derive(Debug, Clone)]
pub struct OcmConfig {
    /// API key; empty means the directory is disabled (no network calls)
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum results to request per query
    pub max_results: u32,
}

impl OcmConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the per-query result cap.
    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = n;
        self
    }
}

/// Client for the Open Charge Map POI endpoint.
#[derive(Debug, Clone)]
pub struct OcmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    max_results: u32,
}

impl OcmClient {
    /// Create a new OCM client.
    pub fn new(config: OcmConfig) -> Result<Self, OcmError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            max_results: config.max_results,
        })
    }

    /// Fetch raw POI records within `radius_km` of a point.
    ///
    /// Records are returned as loose JSON values so that one malformed
    /// record cannot abort the whole batch during deserialization.
    pub async fn fetch_poi(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<Vec<serde_json::Value>, OcmError> {
        if self.api_key.is_empty() {
            return Err(OcmError::MissingApiKey);
        }

        let url = format!("{}/poi", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.clone()),
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("distance", radius_km.to_string()),
                ("distanceunit", "km".to_string()),
                ("maxresults", self.max_results.to_string()),
                ("compact", "true".to_string()),
                ("verbose", "false".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OcmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| OcmError::Json {
            message: e.to_string(),
        })
    }

    /// Fetch and normalize candidates within `radius_km` of a point.
    ///
    /// Best-effort: any client-level failure degrades to an empty list,
    /// and a malformed record is skipped without affecting its siblings.
    pub async fn query_candidates(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
        avg_speed_kmh: f64,
    ) -> Vec<StationCandidate> {
        let records = match self.fetch_poi(lat, lon, radius_km).await {
            Ok(records) => records,
            Err(OcmError::MissingApiKey) => {
                debug!("OCM disabled: no API key configured");
                return Vec::new();
            }
            Err(e) => {
                warn!("OCM query failed, continuing without directory results: {e}");
                return Vec::new();
            }
        };

        records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Poi>(record) {
                Ok(poi) => convert_poi(&poi, lat, lon, radius_km, avg_speed_kmh),
                Err(e) => {
                    warn!("skipping malformed OCM record: {e}");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OcmConfig::new("test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn config_builder() {
        let config = OcmConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(2)
            .with_max_results(10);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 2);
        assert_eq!(config.max_results, 10);
    }

    #[tokio::test]
    async fn missing_key_short_circuits_without_network() {
        // Unroutable base URL: if a request were attempted this would hang
        // or error, but the key check comes first.
        let client = OcmClient::new(
            OcmConfig::new("").with_base_url("http://127.0.0.1:1"),
        )
        .unwrap();

        let err = client.fetch_poi(51.5, -0.1, 10.0).await.unwrap_err();
        assert!(matches!(err, OcmError::MissingApiKey));

        assert!(client.query_candidates(51.5, -0.1, 10.0, 30.0).await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_directory_degrades_to_empty() {
        let client = OcmClient::new(
            OcmConfig::new("test-key")
                .with_base_url("http://127.0.0.1:1")
                .with_timeout(1),
        )
        .unwrap();

        assert!(client.query_candidates(51.5, -0.1, 10.0, 30.0).await.is_empty());
    }

    #[test]
    fn malformed_record_is_skipped_not_fatal() {
        // Drive the per-record path directly: one good record, one where
        // AddressInfo has the wrong type entirely.
        let records = vec![
            serde_json::json!({
                "ID": 7,
                "AddressInfo": {
                    "Title": "Good Station",
                    "Latitude": 51.51,
                    "Longitude": -0.13
                }
            }),
            serde_json::json!({"ID": 8, "AddressInfo": "garbage"}),
        ];

        let candidates: Vec<_> = records
            .into_iter()
            .filter_map(|r| match serde_json::from_value::<Poi>(r) {
                Ok(poi) => convert_poi(&poi, 51.5074, -0.1278, 10.0, 30.0),
                Err(_) => None,
            })
            .collect();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Good Station");
    }
}
