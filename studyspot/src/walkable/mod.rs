//! Libraries within walking distance of stations.
//!
//! Given a set of stations and a walking-time budget, keeps the libraries
//! that at least one station can reach on foot and annotates each with every
//! station that qualifies.

use serde::Serialize;
use tracing::debug;

use crate::geo::{distance_m, walking_distance_m, walking_minutes, within};
use crate::libraries::RemoteLibraryRecord;
use crate::stations::{Station, StationDirectory};

/// A station that can reach a library within the walking budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationWalk {
    pub station: Station,
    /// Great-circle distance in metres
    #[serde(rename = "walkingDistance")]
    pub walking_distance_m: f64,
    /// Minutes at walking pace, rounded up
    #[serde(rename = "walkingTime")]
    pub walking_time_min: u32,
}

/// A library together with the stations it is walkable from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedLibrary {
    #[serde(flatten)]
    pub library: RemoteLibraryRecord,
    /// Nearest first. Never empty.
    #[serde(rename = "nearestStations")]
    pub nearest_stations: Vec<StationWalk>,
}

impl AnnotatedLibrary {
    /// The closest qualifying station.
    pub fn nearest(&self) -> Option<&StationWalk> {
        self.nearest_stations.first()
    }
}

/// Keep the libraries within `walking_minutes` of any of `station_ids`.
///
/// Unknown station ids are ignored; if none resolve the result is empty.
/// Libraries without a usable geocode are dropped. Library order is
/// preserved.
///
/// # Examples
///
/// ```
/// use studyspot::geo::Coordinate;
/// use studyspot::libraries::RemoteLibraryRecord;
/// use studyspot::stations::{Station, StationDirectory};
/// use studyspot::walkable::find_libraries_near_stations;
///
/// let stations = StationDirectory::new(vec![Station::new(
///     "A", "Alpha", "東京都", "Line", "Op", Coordinate::new(35.0, 139.0),
/// )]);
/// let library: RemoteLibraryRecord =
///     serde_json::from_str(r#"{"libid":"1","formal":"L","geocode":"139.0,35.0035"}"#).unwrap();
///
/// let found = find_libraries_near_stations(&stations, &["A"], 5, &[library]);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].nearest_stations[0].walking_time_min, 5);
/// ```
pub fn find_libraries_near_stations<S: AsRef<str>>(
    directory: &StationDirectory,
    station_ids: &[S],
    walking_minutes_budget: u32,
    libraries: &[RemoteLibraryRecord],
) -> Vec<AnnotatedLibrary> {
    let stations = directory.get_by_ids(station_ids);
    if stations.is_empty() {
        debug!(requested = station_ids.len(), "no stations resolved");
        return Vec::new();
    }

    let max_distance = walking_distance_m(walking_minutes_budget);

    let results: Vec<AnnotatedLibrary> = libraries
        .iter()
        .filter_map(|library| {
            let location = library.location()?;

            let mut walks: Vec<StationWalk> = stations
                .iter()
                .map(|station| (*station, distance_m(&station.coordinates, &location)))
                .filter(|(_, distance)| within(*distance, max_distance))
                .map(|(station, distance)| StationWalk {
                    station: station.clone(),
                    walking_distance_m: distance,
                    walking_time_min: walking_minutes(distance),
                })
                .collect();

            if walks.is_empty() {
                return None;
            }
            walks.sort_by(|a, b| a.walking_distance_m.total_cmp(&b.walking_distance_m));

            Some(AnnotatedLibrary {
                library: library.clone(),
                nearest_stations: walks,
            })
        })
        .collect();

    debug!(
        stations = stations.len(),
        libraries = libraries.len(),
        matched = results.len(),
        max_distance,
        "correlated libraries with stations"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{Coordinate, EARTH_RADIUS_M};

    /// Degrees of latitude spanning `meters` along a meridian.
    fn lat_offset(meters: f64) -> f64 {
        meters / (EARTH_RADIUS_M * std::f64::consts::PI / 180.0)
    }

    fn station(id: &str, lat: f64, lon: f64) -> Station {
        Station::new(id, id, "東京都", "Test Line", "Test", Coordinate::new(lat, lon))
    }

    fn library(libid: &str, geocode: &str) -> RemoteLibraryRecord {
        serde_json::from_value(serde_json::json!({
            "systemid": "Test",
            "libid": libid,
            "formal": libid,
            "geocode": geocode,
        }))
        .unwrap()
    }

    fn library_at(libid: &str, lat: f64, lon: f64) -> RemoteLibraryRecord {
        library(libid, &format!("{lon},{lat}"))
    }

    fn ids(results: &[AnnotatedLibrary]) -> Vec<&str> {
        results.iter().map(|r| r.library.libid.as_str()).collect()
    }

    #[test]
    fn boundary_is_inclusive() {
        let dir = StationDirectory::new(vec![station("A", 35.0, 139.0)]);
        let libraries = vec![
            library_at("at-400", 35.0 + lat_offset(400.0), 139.0),
            library_at("at-401", 35.0 + lat_offset(401.0), 139.0),
        ];

        let results = find_libraries_near_stations(&dir, &["A"], 5, &libraries);
        assert_eq!(ids(&results), vec!["at-400"]);

        let walk = &results[0].nearest_stations[0];
        assert!((walk.walking_distance_m - 400.0).abs() < 1e-6);
        assert_eq!(walk.walking_time_min, 5);
    }

    #[test]
    fn end_to_end_single_station() {
        let dir = StationDirectory::new(vec![station("A", 35.0, 139.0)]);
        let libraries = vec![library("north", "139.0,35.0035")];

        let results = find_libraries_near_stations(&dir, &["A"], 5, &libraries);
        assert_eq!(results.len(), 1);
        let walk = results[0].nearest().unwrap();
        assert_eq!(walk.station.id, "A");
        assert!((walk.walking_distance_m - 389.2).abs() < 1.0);
        assert_eq!(walk.walking_time_min, 5);
    }

    #[test]
    fn malformed_geocode_is_excluded() {
        let dir = StationDirectory::new(vec![station("A", 35.0, 139.0)]);
        let libraries = vec![
            library("empty", ""),
            library("one-part", "139.0"),
            library("words", "east,north"),
            library("ok", "139.0,35.0"),
        ];

        let results = find_libraries_near_stations(&dir, &["A"], 5, &libraries);
        assert_eq!(ids(&results), vec!["ok"]);
        assert_eq!(results[0].nearest_stations[0].walking_time_min, 0);
    }

    #[test]
    fn null_geocode_drops_only_that_library() {
        let dir = StationDirectory::new(vec![station("A", 35.0, 139.0)]);
        let libraries = crate::libraries::remote::normalize_response(
            r#"callback([
                {"libid":"good","formal":"A","geocode":"139.0,35.0"},
                {"libid":"bad","formal":"B","geocode":null}
            ]);"#,
        )
        .unwrap();
        assert_eq!(libraries.len(), 2);

        let results = find_libraries_near_stations(&dir, &["A"], 5, &libraries);
        assert_eq!(ids(&results), vec!["good"]);
    }

    #[test]
    fn any_station_qualifies() {
        // Two stations about 2.2 km apart; each library is near only one.
        let dir = StationDirectory::new(vec![station("A", 35.0, 139.0), station("B", 35.02, 139.0)]);
        let libraries = vec![
            library_at("near-a", 35.001, 139.0),
            library_at("near-b", 35.019, 139.0),
            library_at("between", 35.01, 139.0),
        ];

        let results = find_libraries_near_stations(&dir, &["A", "B"], 5, &libraries);
        assert_eq!(ids(&results), vec!["near-a", "near-b"]);
        assert_eq!(results[0].nearest_stations[0].station.id, "A");
        assert_eq!(results[1].nearest_stations[0].station.id, "B");
    }

    #[test]
    fn qualifying_stations_sorted_by_distance() {
        let dir = StationDirectory::new(vec![
            station("far", 35.0, 139.0),
            station("near", 35.002, 139.0),
            station("out", 35.02, 139.0),
        ]);
        let libraries = vec![library_at("lib", 35.0025, 139.0)];

        let results = find_libraries_near_stations(&dir, &["far", "near", "out"], 5, &libraries);
        let walks: Vec<_> = results[0]
            .nearest_stations
            .iter()
            .map(|w| w.station.id.as_str())
            .collect();
        assert_eq!(walks, vec!["near", "far"]);
        assert!(results[0].nearest_stations[0].walking_time_min <= results[0].nearest_stations[1].walking_time_min);
    }

    #[test]
    fn unknown_stations_yield_nothing() {
        let dir = StationDirectory::new(vec![station("A", 35.0, 139.0)]);
        let libraries = vec![library("ok", "139.0,35.0")];

        assert!(find_libraries_near_stations(&dir, &["missing"], 5, &libraries).is_empty());
        assert!(find_libraries_near_stations::<&str>(&dir, &[], 5, &libraries).is_empty());
    }

    #[test]
    fn unknown_ids_are_ignored_alongside_known_ones() {
        let dir = StationDirectory::new(vec![station("A", 35.0, 139.0)]);
        let libraries = vec![library("ok", "139.0,35.001")];

        let results = find_libraries_near_stations(&dir, &["missing", "A"], 5, &libraries);
        assert_eq!(ids(&results), vec!["ok"]);
    }

    #[test]
    fn serializes_walk_fields() {
        let dir = StationDirectory::new(vec![station("A", 35.0, 139.0)]);
        let results = find_libraries_near_stations(&dir, &["A"], 5, &[library("ok", "139.0,35.001")]);
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["libid"], "ok");
        assert_eq!(json["nearestStations"][0]["walkingTime"], 2);
        assert!(json["nearestStations"][0]["walkingDistance"].is_number());
    }
}
