//! Merged station candidate returned by the nearby resolver.

use serde::Serialize;

/// Which source a candidate came from.
///
/// Set at construction and never mutated. A station registered in both
/// sources appears twice, distinguished by this tag and its id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The warehouse station inventory (authoritative)
    Snowflake,
    /// The Open Charge Map public directory (best-effort)
    Ocm,
}

/// A nearby-station result candidate.
///
/// Constructed fresh per request, never cached, discarded after the
/// response is serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationCandidate {
    /// Unique per source: `"<n>"` for warehouse rows, `"ocm_<n>"` for
    /// directory rows. The prefix prevents cross-source collisions.
    pub id: String,

    /// Station name; directory records without a title get a synthesized
    /// "Station at <address>" name
    pub name: String,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Connector/energy description, "Unknown" if the source has none
    pub energy_type: String,

    /// Availability flag; directory records default to true since OCM
    /// carries no real-time signal
    pub available: bool,

    /// Great-circle distance from the query point, rounded to 2 decimals
    pub distance_km: f64,

    /// Straight-line travel-time estimate in whole minutes
    pub travel_time_minutes: u32,

    /// Provenance tag
    pub source: Source,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Source::Snowflake).unwrap(), "\"snowflake\"");
        assert_eq!(serde_json::to_string(&Source::Ocm).unwrap(), "\"ocm\"");
    }

    #[test]
    fn candidate_serializes_all_fields() {
        let candidate = StationCandidate {
            id: "42".to_string(),
            name: "Downtown EV Station".to_string(),
            latitude: 40.7128,
            longitude: -74.0060,
            energy_type: "CCS".to_string(),
            available: true,
            distance_km: 1.25,
            travel_time_minutes: 2,
            source: Source::Snowflake,
        };

        let json: serde_json::Value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["distance_km"], 1.25);
        assert_eq!(json["travel_time_minutes"], 2);
        assert_eq!(json["source"], "snowflake");
    }
}
