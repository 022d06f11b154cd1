//! In-memory station store for tests and local development.
//!
//! Serves a fixed set of stations without warehouse credentials, computing
//! radius distances in-process with the same Haversine formula the
//! warehouse uses server-side.

use std::path::Path;

use crate::domain::Station;
use crate::geo;

use super::error::StoreError;
use super::{NearbyRow, StationStore};

/// In-memory implementation of [`StationStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stations: Vec<Station>,
}

impl MemoryStore {
    /// Create a store holding the given stations.
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Load stations from a JSON file containing an array of stations.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| StoreError::Response {
            message: format!("failed to read {}: {e}", path.display()),
        })?;

        let stations: Vec<Station> =
            serde_json::from_str(&json).map_err(|e| StoreError::Response {
                message: format!("failed to parse {}: {e}", path.display()),
            })?;

        Ok(Self { stations })
    }

    /// Number of stations held.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the store holds no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl StationStore for MemoryStore {
    async fn query_by_radius(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<Vec<NearbyRow>, StoreError> {
        let mut rows: Vec<NearbyRow> = self
            .stations
            .iter()
            .map(|s| NearbyRow {
                station: s.clone(),
                distance_km: geo::distance_km(lat, lon, s.latitude, s.longitude),
            })
            .filter(|r| r.distance_km <= radius_km)
            .collect();

        rows.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        Ok(rows)
    }

    async fn list(&self, limit: usize) -> Result<Vec<Station>, StoreError> {
        Ok(self.stations.iter().take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.stations.len() as u64)
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Station>, StoreError> {
        let term = term.to_lowercase();
        let mut matches: Vec<Station> = self
            .stations
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&term))
            .cloned()
            .collect();

        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.truncate(limit);

        Ok(matches)
    }
}
