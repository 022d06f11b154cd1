//! Great-circle distance and travel-time estimation.

/// Earth's mean radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers.
///
/// Uses the Haversine formula. Inputs are degrees.
///
/// Coordinates are not validated: (0, 0) is a real point in the Gulf of
/// Guinea, so callers must drop records with zero/missing coordinates
/// *before* calling this, not after.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Estimated travel time in whole minutes at a fixed average speed.
///
/// Straight-line estimate only; no routing or traffic modeling.
pub fn travel_time_minutes(distance_km: f64, avg_speed_kmh: f64) -> u32 {
    (distance_km / avg_speed_kmh * 60.0).floor() as u32
}

/// Round a distance to 2 decimal places for reporting.
pub fn round2(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
