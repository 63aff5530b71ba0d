//! Search configuration for library searches.

/// Tuning for [`LibrarySearch`](super::LibrarySearch).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Result cap passed to the remote API for nearby, prefecture and city
    /// searches.
    pub limit: u32,

    /// Radius for nearby searches, in metres.
    pub nearby_radius_m: f64,

    /// Result cap when fetching a whole prefecture for station mode.
    /// Large enough to cover every library in a prefecture.
    pub station_fetch_limit: u32,
}

impl SearchConfig {
    pub fn new(limit: u32, nearby_radius_m: f64, station_fetch_limit: u32) -> Self {
        Self {
            limit,
            nearby_radius_m,
            station_fetch_limit,
        }
    }

    /// Set the result cap.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: 20,
            nearby_radius_m: 5_000.0,
            station_fetch_limit: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.limit, 20);
        assert_eq!(config.nearby_radius_m, 5_000.0);
        assert_eq!(config.station_fetch_limit, 1_000);
        assert_eq!(config.with_limit(50).limit, 50);
    }
}
