//! Warehouse station row.

use serde::{Deserialize, Serialize};

/// A charging station as stored in the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Warehouse primary key
    pub id: i64,

    /// Human-readable station name
    pub name: String,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Connector/energy description (e.g. "CCS, Type 2")
    pub energy_type: String,

    /// Whether the station is currently available
    pub available: bool,
}
