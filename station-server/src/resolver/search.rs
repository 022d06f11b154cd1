//! Nearby-station search: query both sources, merge, rank, truncate.

use std::sync::Arc;

use crate::domain::{Source, StationCandidate};
use crate::geo;
use crate::ocm::OcmClient;
use crate::store::{NearbyRow, StationStore, StoreError};

use super::config::ResolverConfig;

/// Error from nearby-station resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Malformed or out-of-range request parameters; no collaborator was
    /// contacted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The authoritative store could not answer. Never conflated with an
    /// empty result set.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A nearby-station query.
#[derive(Debug, Clone)]
pub struct NearbyRequest {
    /// Query point latitude in degrees.
    pub lat: f64,

    /// Query point longitude in degrees.
    pub lon: f64,

    /// Search radius in kilometers.
    pub radius_km: f64,

    /// Whether to also query the OCM directory.
    pub include_directory: bool,

    /// Maximum number of candidates to return.
    pub limit: usize,
}

impl NearbyRequest {
    /// Validate request bounds against the configured limits.
    pub fn validate(&self, config: &ResolverConfig) -> Result<(), ResolveError> {
        if !(-90.0..=90.0).contains(&self.lat) || !self.lat.is_finite() {
            return Err(ResolveError::InvalidRequest(format!(
                "latitude out of range [-90, 90]: {}",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) || !self.lon.is_finite() {
            return Err(ResolveError::InvalidRequest(format!(
                "longitude out of range [-180, 180]: {}",
                self.lon
            )));
        }
        if !(self.radius_km > 0.0 && self.radius_km <= config.max_radius_km) {
            return Err(ResolveError::InvalidRequest(format!(
                "radius_km out of range (0, {}]: {}",
                config.max_radius_km, self.radius_km
            )));
        }
        if self.limit < 1 {
            return Err(ResolveError::InvalidRequest(
                "limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Nearby-station resolver over a station store and the OCM directory.
///
/// Request-scoped and stateless across invocations: safe to call from any
/// number of concurrent requests without locking.
pub struct Resolver<S> {
    store: Arc<S>,
    directory: OcmClient,
    config: ResolverConfig,
}

impl<S: StationStore> Resolver<S> {
    /// Create a new resolver.
    pub fn new(store: Arc<S>, directory: OcmClient, config: ResolverConfig) -> Self {
        Self {
            store,
            directory,
            config,
        }
    }

    /// Find the nearest stations to a point.
    ///
    /// The store is always queried and its failure propagates. The
    /// directory is queried only when requested, concurrently with the
    /// store, and its failures degrade to fewer results.
    pub async fn nearby_stations(
        &self,
        req: &NearbyRequest,
    ) -> Result<Vec<StationCandidate>, ResolveError> {
        req.validate(&self.config)?;

        let (rows, directory) = if req.include_directory {
            let (rows, directory) = tokio::join!(
                self.store.query_by_radius(req.lat, req.lon, req.radius_km),
                self.directory.query_candidates(
                    req.lat,
                    req.lon,
                    req.radius_km,
                    self.config.avg_speed_kmh
                ),
            );
            (rows?, directory)
        } else {
            let rows = self
                .store
                .query_by_radius(req.lat, req.lon, req.radius_km)
                .await?;
            (rows, Vec::new())
        };

        // The store's radius query may pre-filter approximately (e.g. a
        // bounding box), so re-check its own reported distance. The check
        // uses the rounded value so the returned `distance_km` field never
        // exceeds the radius.
        let local: Vec<StationCandidate> = rows
            .into_iter()
            .filter(|r| geo::round2(r.distance_km) <= req.radius_km)
            .map(|r| candidate_from_row(r, self.config.avg_speed_kmh))
            .collect();

        Ok(merge_and_rank(local, directory, req.limit))
    }
}

/// Build a candidate from a store row, keeping the store's distance.
fn candidate_from_row(row: NearbyRow, avg_speed_kmh: f64) -> StationCandidate {
    StationCandidate {
        id: row.station.id.to_string(),
        name: row.station.name,
        latitude: row.station.latitude,
        longitude: row.station.longitude,
        energy_type: row.station.energy_type,
        available: row.station.available,
        distance_km: geo::round2(row.distance_km),
        travel_time_minutes: geo::travel_time_minutes(row.distance_km, avg_speed_kmh),
        source: Source::Snowflake,
    }
}

/// Concatenate local and directory candidates, sort ascending by distance,
/// truncate to `limit`.
///
/// The sort is stable with local candidates first, so on a distance tie
/// warehouse rows precede directory rows. A station present in both
/// sources is intentionally returned twice, distinguished by `source` and
/// its id prefix.
pub fn merge_and_rank(
    local: Vec<StationCandidate>,
    directory: Vec<StationCandidate>,
    limit: usize,
) -> Vec<StationCandidate> {
    let mut merged = local;
    merged.extend(directory);
    merged.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    merged.truncate(limit);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Station;
    use crate::ocm::OcmConfig;
    use crate::store::MemoryStore;

    fn station(id: i64, name: &str, lat: f64, lon: f64) -> Station {
        Station {
            id,
            name: name.to_string(),
            latitude: lat,
            longitude: lon,
            energy_type: "CCS".to_string(),
            available: true,
        }
    }

    fn offline_directory() -> OcmClient {
        // No key configured: short-circuits to empty with no network call
        OcmClient::new(OcmConfig::new("")).unwrap()
    }

    fn resolver_with(stations: Vec<Station>) -> Resolver<MemoryStore> {
        Resolver::new(
            Arc::new(MemoryStore::new(stations)),
            offline_directory(),
            ResolverConfig::default(),
        )
    }

    fn request(lat: f64, lon: f64, radius_km: f64, limit: usize) -> NearbyRequest {
        NearbyRequest {
            lat,
            lon,
            radius_km,
            include_directory: false,
            limit,
        }
    }

    #[test]
    fn validation_rejects_out_of_range_inputs() {
        let config = ResolverConfig::default();

        let cases = [
            request(91.0, 0.0, 10.0, 5),
            request(-91.0, 0.0, 10.0, 5),
            request(0.0, 181.0, 10.0, 5),
            request(0.0, -181.0, 10.0, 5),
            request(0.0, 0.0, 0.0, 5),
            request(0.0, 0.0, -1.0, 5),
            request(0.0, 0.0, 101.0, 5),
            request(0.0, 0.0, 10.0, 0),
            request(f64::NAN, 0.0, 10.0, 5),
        ];

        for req in cases {
            assert!(
                matches!(req.validate(&config), Err(ResolveError::InvalidRequest(_))),
                "expected rejection for {req:?}"
            );
        }

        assert!(request(90.0, -180.0, 100.0, 1).validate(&config).is_ok());
    }

    #[tokio::test]
    async fn invalid_input_fails_before_any_query() {
        let resolver = resolver_with(vec![]);
        let err = resolver
            .nearby_stations(&request(200.0, 0.0, 10.0, 5))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn single_station_at_query_point() {
        let resolver = resolver_with(vec![station(
            1,
            "Downtown EV Station",
            40.7128,
            -74.0060,
        )]);

        let results = resolver
            .nearby_stations(&request(40.7128, -74.0060, 10.0, 5))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let only = &results[0];
        assert_eq!(only.id, "1");
        assert_eq!(only.name, "Downtown EV Station");
        assert_eq!(only.distance_km, 0.0);
        assert_eq!(only.travel_time_minutes, 0);
        assert_eq!(only.source, Source::Snowflake);
    }

    #[tokio::test]
    async fn limit_keeps_only_the_nearest() {
        // ~1.2 km and ~3.5 km north of the query point
        let resolver = resolver_with(vec![
            station(1, "Far", 40.7443, -74.0060),
            station(2, "Near", 40.7236, -74.0060),
        ]);

        let results = resolver
            .nearby_stations(&request(40.7128, -74.0060, 10.0, 1))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Near");
        assert!((results[0].distance_km - 1.2).abs() < 0.1);
    }

    #[tokio::test]
    async fn empty_result_is_not_an_error() {
        let resolver = resolver_with(vec![]);
        let results = resolver
            .nearby_stations(&request(40.7128, -74.0060, 10.0, 5))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn store_error_propagates() {
        struct BrokenStore;

        impl StationStore for BrokenStore {
            async fn query_by_radius(
                &self,
                _lat: f64,
                _lon: f64,
                _radius_km: f64,
            ) -> Result<Vec<NearbyRow>, StoreError> {
                Err(StoreError::NotConfigured("test".to_string()))
            }

            async fn list(&self, _limit: usize) -> Result<Vec<Station>, StoreError> {
                Err(StoreError::NotConfigured("test".to_string()))
            }

            async fn count(&self) -> Result<u64, StoreError> {
                Err(StoreError::NotConfigured("test".to_string()))
            }

            async fn search(&self, _term: &str, _limit: usize) -> Result<Vec<Station>, StoreError> {
                Err(StoreError::NotConfigured("test".to_string()))
            }
        }

        let resolver = Resolver::new(
            Arc::new(BrokenStore),
            offline_directory(),
            ResolverConfig::default(),
        );

        let err = resolver
            .nearby_stations(&request(40.7128, -74.0060, 10.0, 5))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Store(_)));
    }

    #[tokio::test]
    async fn imprecise_store_rows_beyond_radius_are_dropped() {
        // A store whose radius query over-returns (bounding-box style)
        struct SloppyStore;

        impl StationStore for SloppyStore {
            async fn query_by_radius(
                &self,
                _lat: f64,
                _lon: f64,
                _radius_km: f64,
            ) -> Result<Vec<NearbyRow>, StoreError> {
                Ok(vec![
                    NearbyRow {
                        station: station(1, "Inside", 40.72, -74.0),
                        distance_km: 2.0,
                    },
                    NearbyRow {
                        station: station(2, "Outside", 40.9, -74.0),
                        distance_km: 14.0,
                    },
                ])
            }

            async fn list(&self, _limit: usize) -> Result<Vec<Station>, StoreError> {
                Ok(vec![])
            }

            async fn count(&self) -> Result<u64, StoreError> {
                Ok(0)
            }

            async fn search(&self, _term: &str, _limit: usize) -> Result<Vec<Station>, StoreError> {
                Ok(vec![])
            }
        }

        let resolver = Resolver::new(
            Arc::new(SloppyStore),
            offline_directory(),
            ResolverConfig::default(),
        );

        let results = resolver
            .nearby_stations(&request(40.7128, -74.0060, 10.0, 5))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Inside");
    }

    #[tokio::test]
    async fn unreachable_directory_still_returns_local_results() {
        let directory = OcmClient::new(
            OcmConfig::new("test-key")
                .with_base_url("http://127.0.0.1:1")
                .with_timeout(1),
        )
        .unwrap();

        let resolver = Resolver::new(
            Arc::new(MemoryStore::new(vec![station(
                1,
                "Downtown EV Station",
                40.7128,
                -74.0060,
            )])),
            directory,
            ResolverConfig::default(),
        );

        let results = resolver
            .nearby_stations(&NearbyRequest {
                lat: 40.7128,
                lon: -74.0060,
                radius_km: 10.0,
                include_directory: true,
                limit: 5,
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, Source::Snowflake);
    }

    #[test]
    fn merge_is_stable_on_distance_ties() {
        let local = vec![candidate("1", 2.0, Source::Snowflake)];
        let directory = vec![candidate("ocm_9", 2.0, Source::Ocm)];

        let merged = merge_and_rank(local, directory, 10);
        assert_eq!(merged[0].source, Source::Snowflake);
        assert_eq!(merged[1].source, Source::Ocm);
    }

    fn candidate(id: &str, distance_km: f64, source: Source) -> StationCandidate {
        StationCandidate {
            id: id.to_string(),
            name: format!("Station {id}"),
            latitude: 0.0,
            longitude: 0.0,
            energy_type: "CCS".to_string(),
            available: true,
            distance_km,
            travel_time_minutes: 0,
            source,
        }
    }
}
