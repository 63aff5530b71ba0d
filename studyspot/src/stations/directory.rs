//! In-memory station directory.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::geo::{Coordinate, distance_m, within};

use super::data::major_stations;
use super::error::StationError;
use super::reading::{hiragana_to_katakana, reading_of, romaji_to_hiragana};
use super::station::{NearbyStation, Station};

/// Maximum number of results from a name search.
pub const NAME_SEARCH_LIMIT: usize = 50;

/// A read-only table of stations.
///
/// Built once at startup and passed to whatever needs station lookups.
/// Every query returns results in table order unless it says otherwise.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: Vec<Station>,
}

impl StationDirectory {
    /// Create a directory from an explicit station list.
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// The built-in table of major stations.
    pub fn builtin() -> Self {
        Self::new(major_stations())
    }

    /// Load a station table from a JSON file holding an array of stations.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| StationError::Io {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let stations: Vec<Station> =
            serde_json::from_str(&contents).map_err(|e| StationError::Json {
                message: e.to_string(),
            })?;

        debug!(path = %path.display(), count = stations.len(), "loaded station table");
        Ok(Self::new(stations))
    }

    /// A copy of this directory with extra stations appended.
    ///
    /// Stations whose id is already present are skipped, so suggestions
    /// fetched from the remote API can be merged without duplicates.
    pub fn with_suggestions(&self, extra: impl IntoIterator<Item = Station>) -> Self {
        let mut stations = self.stations.clone();
        let mut seen: HashSet<String> = stations.iter().map(|s| s.id.clone()).collect();

        for station in extra {
            if seen.insert(station.id.clone()) {
                stations.push(station);
            }
        }

        Self { stations }
    }

    /// All stations, in table order.
    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Case-insensitive substring search on the station name.
    ///
    /// Also matches through kana readings and known romaji spellings. A blank
    /// query returns nothing. At most [`NAME_SEARCH_LIMIT`] results.
    ///
    /// # Examples
    ///
    /// ```
    /// use studyspot::stations::StationDirectory;
    ///
    /// let dir = StationDirectory::builtin();
    /// assert!(dir.search_by_name("").is_empty());
    /// assert!(dir.search_by_name("横浜").iter().any(|s| s.name == "横浜"));
    /// assert!(dir.search_by_name("yokohama").iter().any(|s| s.name == "横浜"));
    /// ```
    pub fn search_by_name(&self, query: &str) -> Vec<&Station> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return Vec::new();
        }

        let patterns = [
            normalized.clone(),
            query.to_string(),
            romaji_to_hiragana(&normalized),
            hiragana_to_katakana(&normalized),
        ];

        self.stations
            .iter()
            .filter(|station| {
                let lower = station.name.to_lowercase();
                let reading = reading_of(&station.name);
                patterns.iter().any(|p| {
                    lower.contains(p.as_str())
                        || station.name.contains(p.as_str())
                        || reading.contains(p.as_str())
                })
            })
            .take(NAME_SEARCH_LIMIT)
            .collect()
    }

    /// Stations in exactly this prefecture.
    pub fn search_by_prefecture(&self, prefecture: &str) -> Vec<&Station> {
        self.stations
            .iter()
            .filter(|s| s.prefecture == prefecture)
            .collect()
    }

    /// Stations whose operator name contains `operator`.
    pub fn search_by_operator(&self, operator: &str) -> Vec<&Station> {
        self.stations
            .iter()
            .filter(|s| s.operator.contains(operator))
            .collect()
    }

    /// Look up a station by id.
    pub fn get_by_id(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Stations whose id is in `ids`, in table order. Unknown ids are omitted.
    pub fn get_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&Station> {
        let wanted: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
        self.stations
            .iter()
            .filter(|s| wanted.contains(s.id.as_str()))
            .collect()
    }

    /// Stations within `radius_m` of `origin`, nearest first.
    ///
    /// Ties keep table order.
    pub fn search_nearby(&self, origin: &Coordinate, radius_m: f64) -> Vec<NearbyStation> {
        let mut results: Vec<NearbyStation> = self
            .stations
            .iter()
            .map(|station| NearbyStation {
                distance: distance_m(origin, &station.coordinates),
                station: station.clone(),
            })
            .filter(|r| within(r.distance, radius_m))
            .collect();

        // sort_by is stable
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }
}
