//! Authoritative station store.
//!
//! The warehouse is the authoritative source for station data: if it is
//! unreachable the request fails, it is never silently treated as empty.

mod client;
mod error;
mod memory;

use std::future::Future;

pub use client::{SnowflakeConfig, SnowflakeStore};
pub use error::StoreError;
pub use memory::MemoryStore;

use crate::domain::Station;

/// A station row with the store's own distance computation attached.
///
/// The store computes distance server-side with the same Haversine formula
/// the resolver uses, so this value is authoritative and is not recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRow {
    pub station: Station,
    pub distance_km: f64,
}

/// The seam between the resolver and the warehouse.
///
/// Implemented by [`SnowflakeStore`] in production and [`MemoryStore`] in
/// tests and local development.
pub trait StationStore: Send + Sync {
    /// Stations within `radius_km` of a point, nearest first, with the
    /// store-computed distance attached.
    fn query_by_radius(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> impl Future<Output = Result<Vec<NearbyRow>, StoreError>> + Send;

    /// Most recently added stations, up to `limit`.
    fn list(&self, limit: usize) -> impl Future<Output = Result<Vec<Station>, StoreError>> + Send;

    /// Total number of stations.
    fn count(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Case-insensitive substring search over station name and location,
    /// ordered by name, up to `limit`.
    fn search(
        &self,
        term: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Station>, StoreError>> + Send;
}
