//! Library search orchestration.
//!
//! Validates the user's selection, queries the remote directory and, for
//! station searches, narrows the results to libraries within walking
//! distance.

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::geo::Coordinate;
use crate::libraries::{CalilClient, CalilError, RemoteLibraryRecord};
use crate::stations::StationDirectory;
use crate::walkable::{AnnotatedLibrary, find_libraries_near_stations};

use super::advisory::{SearchAdvisory, SearchKind};
use super::config::SearchConfig;

/// Source of remote library records.
///
/// This abstraction allows searches to be tested without the network.
#[allow(async_fn_in_trait)]
pub trait LibrarySource {
    async fn by_prefecture(
        &self,
        prefecture: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RemoteLibraryRecord>, CalilError>;

    async fn by_city(
        &self,
        prefecture: &str,
        city: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RemoteLibraryRecord>, CalilError>;

    async fn by_location(
        &self,
        origin: Coordinate,
        radius_m: f64,
        limit: u32,
    ) -> Result<Vec<RemoteLibraryRecord>, CalilError>;
}

impl LibrarySource for CalilClient {
    async fn by_prefecture(
        &self,
        prefecture: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RemoteLibraryRecord>, CalilError> {
        self.search_by_prefecture_strict(prefecture, limit).await
    }

    async fn by_city(
        &self,
        prefecture: &str,
        city: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RemoteLibraryRecord>, CalilError> {
        self.search_by_city_strict(prefecture, city, limit).await
    }

    async fn by_location(
        &self,
        origin: Coordinate,
        radius_m: f64,
        limit: u32,
    ) -> Result<Vec<RemoteLibraryRecord>, CalilError> {
        self.search_by_location_strict(origin.latitude, origin.longitude, radius_m, limit)
            .await
    }
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchMode {
    /// Around the user's position, if known
    Nearby { origin: Option<Coordinate> },
    Prefecture { prefecture: String },
    City { prefecture: String, city: String },
    /// Within walking distance of any of the selected stations
    Station {
        station_ids: Vec<String>,
        walking_minutes: u32,
    },
}

impl SearchMode {
    pub fn kind(&self) -> SearchKind {
        match self {
            SearchMode::Nearby { .. } => SearchKind::Nearby,
            SearchMode::Prefecture { .. } => SearchKind::Prefecture,
            SearchMode::City { .. } => SearchKind::City,
            SearchMode::Station { .. } => SearchKind::Station,
        }
    }
}

/// Libraries found by a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResults {
    /// Directory records as returned by the API
    Libraries(Vec<RemoteLibraryRecord>),
    /// Station searches carry the qualifying stations
    NearStations(Vec<AnnotatedLibrary>),
}

impl SearchResults {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Libraries(l) => l.len(),
            SearchResults::NearStations(l) => l.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SearchResults {
    fn default() -> Self {
        SearchResults::Libraries(Vec::new())
    }
}

/// Results plus an optional message for the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub libraries: SearchResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<SearchAdvisory>,
}

impl SearchOutcome {
    fn advise(advisory: SearchAdvisory) -> Self {
        Self {
            libraries: SearchResults::default(),
            advisory: Some(advisory),
        }
    }

    fn libraries(records: Vec<RemoteLibraryRecord>) -> Self {
        Self {
            libraries: SearchResults::Libraries(records),
            advisory: None,
        }
    }
}

/// Runs searches against a [`LibrarySource`].
pub struct LibrarySearch<'a, S: LibrarySource> {
    source: &'a S,
    stations: &'a StationDirectory,
    config: &'a SearchConfig,
}

impl<'a, S: LibrarySource> LibrarySearch<'a, S> {
    pub fn new(source: &'a S, stations: &'a StationDirectory, config: &'a SearchConfig) -> Self {
        Self {
            source,
            stations,
            config,
        }
    }

    /// Run one search.
    ///
    /// Never fails: invalid selections and remote failures come back as an
    /// empty result with an advisory.
    pub async fn run(&self, mode: &SearchMode) -> SearchOutcome {
        let kind = mode.kind();
        let fetched = match mode {
            SearchMode::Nearby { origin } => {
                let Some(origin) = origin else {
                    return SearchOutcome::advise(SearchAdvisory::LocationUnavailable);
                };
                self.source
                    .by_location(*origin, self.config.nearby_radius_m, self.config.limit)
                    .await
            }
            SearchMode::Prefecture { prefecture } => {
                if prefecture.trim().is_empty() {
                    return SearchOutcome::advise(SearchAdvisory::PrefectureRequired);
                }
                self.source
                    .by_prefecture(prefecture, Some(self.config.limit))
                    .await
            }
            SearchMode::City { prefecture, city } => {
                if prefecture.trim().is_empty() {
                    return SearchOutcome::advise(SearchAdvisory::PrefectureRequired);
                }
                if city.trim().is_empty() {
                    return SearchOutcome::advise(SearchAdvisory::CityRequired);
                }
                self.source
                    .by_city(prefecture, city.trim(), Some(self.config.limit))
                    .await
            }
            SearchMode::Station {
                station_ids,
                walking_minutes,
            } => return self.near_stations(station_ids, *walking_minutes).await,
        };

        match fetched {
            Ok(records) => {
                debug!(?kind, count = records.len(), "library search complete");
                SearchOutcome::libraries(records)
            }
            Err(e) => {
                warn!(?kind, failure = e.kind(), error = %e, "library search failed");
                SearchOutcome::advise(SearchAdvisory::SearchFailed(kind))
            }
        }
    }

    async fn near_stations(&self, station_ids: &[String], walking_minutes: u32) -> SearchOutcome {
        let stations = self.stations.get_by_ids(station_ids);
        if stations.is_empty() {
            return SearchOutcome::advise(SearchAdvisory::StationRequired);
        }

        let mut prefectures: Vec<&str> = Vec::new();
        for station in &stations {
            if !prefectures.contains(&station.prefecture.as_str()) {
                prefectures.push(&station.prefecture);
            }
        }

        let limit = Some(self.config.station_fetch_limit);
        let fetches = prefectures
            .iter()
            .map(|prefecture| self.source.by_prefecture(prefecture, limit));
        let responses = join_all(fetches).await;

        let mut libraries = Vec::new();
        let mut failures = 0;
        for (prefecture, response) in prefectures.iter().zip(responses) {
            match response {
                Ok(records) => libraries.extend(records),
                Err(e) => {
                    failures += 1;
                    warn!(prefecture = %prefecture, error = %e, "prefecture fetch failed");
                }
            }
        }

        if failures == prefectures.len() {
            return SearchOutcome::advise(SearchAdvisory::SearchFailed(SearchKind::Station));
        }

        let matched =
            find_libraries_near_stations(self.stations, station_ids, walking_minutes, &libraries);
        info!(
            stations = stations.len(),
            prefectures = prefectures.len(),
            fetched = libraries.len(),
            matched = matched.len(),
            walking_minutes,
            "station search complete"
        );

        let advisory = matched
            .is_empty()
            .then_some(SearchAdvisory::NothingNearStations { walking_minutes });
        SearchOutcome {
            libraries: SearchResults::NearStations(matched),
            advisory,
        }
    }
}
