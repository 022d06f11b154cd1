//! Normalization of OCM records into station candidates.

use crate::domain::{Source, StationCandidate};
use crate::geo;

use super::types::Poi;

/// Normalize a single OCM record into a candidate.
///
/// Returns `None` when the record is unusable or out of range:
/// - either coordinate is absent or exactly zero (OCM uses 0 for unset,
///   and (0, 0) is a real but meaningless point),
/// - the computed distance exceeds `radius_km` (OCM's own radius filter
///   is approximate).
pub fn convert_poi(
    poi: &Poi,
    origin_lat: f64,
    origin_lon: f64,
    radius_km: f64,
    avg_speed_kmh: f64,
) -> Option<StationCandidate> {
    let address = poi.address_info.as_ref();

    let lat = address.and_then(|a| a.latitude).filter(|&v| v != 0.0)?;
    let lon = address.and_then(|a| a.longitude).filter(|&v| v != 0.0)?;

    let distance = geo::distance_km(origin_lat, origin_lon, lat, lon);
    // Compare the rounded value so the reported distance never exceeds
    // the radius.
    let rounded = geo::round2(distance);
    if rounded > radius_km {
        return None;
    }

    let name = match address.and_then(|a| a.title.as_deref()) {
        Some(title) if !title.is_empty() && title != "Unknown Station" => title.to_string(),
        _ => {
            let line1 = address
                .and_then(|a| a.address_line1.as_deref())
                .unwrap_or("Unknown Location");
            format!("Station at {line1}")
        }
    };

    // Distinct connector titles, first-seen order
    let mut energy_types: Vec<&str> = Vec::new();
    for conn in &poi.connections {
        let title = conn
            .connection_type
            .as_ref()
            .and_then(|t| t.title.as_deref())
            .unwrap_or("Unknown");
        if !energy_types.contains(&title) {
            energy_types.push(title);
        }
    }
    let energy_type = if energy_types.is_empty() {
        "Unknown".to_string()
    } else {
        energy_types.join(", ")
    };

    // Prefer OCM's stable record id; a positional fallback would collide
    // under partial failures, so synthesize a UUID instead.
    let id = match poi.id {
        Some(ocm_id) => format!("ocm_{ocm_id}"),
        None => format!("ocm_{}", uuid::Uuid::new_v4()),
    };

    Some(StationCandidate {
        id,
        name,
        latitude: lat,
        longitude: lon,
        energy_type,
        available: true, // OCM has no real-time availability signal
        distance_km: rounded,
        travel_time_minutes: geo::travel_time_minutes(distance, avg_speed_kmh),
        source: Source::Ocm,
    })
}
