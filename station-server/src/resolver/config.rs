//! Resolver configuration.

/// Configuration parameters for nearby-station resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Assumed average travel speed for time estimates (km/h).
    pub avg_speed_kmh: f64,

    /// Largest radius a caller may request (km).
    pub max_radius_km: f64,
}

impl ResolverConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(avg_speed_kmh: f64, max_radius_km: f64) -> Self {
        Self {
            avg_speed_kmh,
            max_radius_km,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            avg_speed_kmh: 30.0,
            max_radius_km: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.avg_speed_kmh, 30.0);
        assert_eq!(config.max_radius_km, 100.0);
    }

    #[test]
    fn custom_config() {
        let config = ResolverConfig::new(50.0, 25.0);
        assert_eq!(config.avg_speed_kmh, 50.0);
        assert_eq!(config.max_radius_km, 25.0);
    }
}
