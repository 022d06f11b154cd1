//! Wire types for the Open Charge Map POI endpoint.
//!
//! Only the fields this service reads; everything else in the (large) OCM
//! record is ignored. Field names on the wire are PascalCase with an
//! all-caps `ID`.

use serde::Deserialize;

/// A charge point of interest.
#[derive(Debug, Clone, Deserialize)]
pub struct Poi {
    /// OCM's stable record id
    #[serde(rename = "ID")]
    pub id: Option<i64>,

    #[serde(rename = "AddressInfo")]
    pub address_info: Option<AddressInfo>,

    #[serde(rename = "Connections", default)]
    pub connections: Vec<Connection>,
}

/// Location block of a POI.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressInfo {
    #[serde(rename = "Title")]
    pub title: Option<String>,

    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,

    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,

    #[serde(rename = "AddressLine1")]
    pub address_line1: Option<String>,
}

/// A physical connector on a charge point.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection {
    #[serde(rename = "ConnectionType")]
    pub connection_type: Option<ConnectionType>,
}

/// Connector type description.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionType {
    #[serde(rename = "Title")]
    pub title: Option<String>,
}
