//! Calil library API client.

use std::time::Duration;

use tracing::{debug, warn};

use crate::geo::{Coordinate, Geocode, distance_m, within};

use super::error::CalilError;
use super::normalize::normalize_response;
use super::types::RemoteLibraryRecord;

/// Default base URL for the Calil API.
const DEFAULT_BASE_URL: &str = "https://api.calil.jp";

/// Default radius for location searches, in metres.
pub const DEFAULT_SEARCH_RADIUS_M: f64 = 5_000.0;

/// Default result cap for location searches.
pub const DEFAULT_LOCATION_LIMIT: u32 = 20;

/// Configuration for the Calil client.
#[derive(Debug, Clone)]
pub struct CalilConfig {
    /// Application key issued by Calil
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CalilConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Parameters for one `/library` request.
#[derive(Debug, Default)]
struct LibraryQuery<'a> {
    pref: Option<&'a str>,
    city: Option<&'a str>,
    geocode: Option<Geocode>,
    systemid: Option<&'a str>,
    limit: Option<u32>,
}

impl LibraryQuery<'_> {
    fn params(&self, key: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![("key", key.to_string())];
        if let Some(pref) = self.pref {
            params.push(("pref", pref.to_string()));
        }
        if let Some(city) = self.city {
            params.push(("city", city.to_string()));
        }
        if let Some(geocode) = &self.geocode {
            params.push(("geocode", geocode.to_string()));
        }
        if let Some(systemid) = self.systemid {
            params.push(("systemid", systemid.to_string()));
        }
        params.push(("format", "json".to_string()));
        params.push(("callback", "no".to_string()));
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Client for the Calil `/library` endpoint.
///
/// Each search comes in two flavours: the plain method logs failures and
/// returns an empty list, the `_strict` method reports them.
#[derive(Debug, Clone)]
pub struct CalilClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CalilClient {
    pub fn new(config: CalilConfig) -> Result<Self, CalilError> {
        if config.api_key.trim().is_empty() {
            return Err(CalilError::Config("API key is empty".into()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Libraries in a prefecture, e.g. `東京都`.
    pub async fn search_by_prefecture(
        &self,
        prefecture: &str,
        limit: Option<u32>,
    ) -> Vec<RemoteLibraryRecord> {
        degrade(
            "prefecture",
            self.search_by_prefecture_strict(prefecture, limit).await,
        )
    }

    pub async fn search_by_prefecture_strict(
        &self,
        prefecture: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RemoteLibraryRecord>, CalilError> {
        self.fetch(&LibraryQuery {
            pref: Some(prefecture),
            limit,
            ..Default::default()
        })
        .await
    }

    /// Libraries in a city within a prefecture.
    pub async fn search_by_city(
        &self,
        prefecture: &str,
        city: &str,
        limit: Option<u32>,
    ) -> Vec<RemoteLibraryRecord> {
        degrade(
            "city",
            self.search_by_city_strict(prefecture, city, limit).await,
        )
    }

    pub async fn search_by_city_strict(
        &self,
        prefecture: &str,
        city: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RemoteLibraryRecord>, CalilError> {
        self.fetch(&LibraryQuery {
            pref: Some(prefecture),
            city: Some(city),
            limit,
            ..Default::default()
        })
        .await
    }

    /// Libraries near a point, nearest first as ranked by the API.
    ///
    /// The API only honours `limit`, so records farther than `radius_m` from
    /// the query point, or without a usable geocode, are dropped here.
    pub async fn search_by_location(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        limit: u32,
    ) -> Vec<RemoteLibraryRecord> {
        degrade(
            "location",
            self.search_by_location_strict(latitude, longitude, radius_m, limit)
                .await,
        )
    }

    pub async fn search_by_location_strict(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        limit: u32,
    ) -> Result<Vec<RemoteLibraryRecord>, CalilError> {
        let origin = Coordinate::new(latitude, longitude);
        let records = self
            .fetch(&LibraryQuery {
                geocode: Some(Geocode::from_coordinate(origin)),
                limit: Some(limit),
                ..Default::default()
            })
            .await?;

        Ok(filter_by_radius(records, &origin, radius_m))
    }

    /// Libraries belonging to one library system.
    pub async fn search_by_system_id(&self, system_id: &str) -> Vec<RemoteLibraryRecord> {
        degrade("system", self.search_by_system_id_strict(system_id).await)
    }

    pub async fn search_by_system_id_strict(
        &self,
        system_id: &str,
    ) -> Result<Vec<RemoteLibraryRecord>, CalilError> {
        self.fetch(&LibraryQuery {
            systemid: Some(system_id),
            ..Default::default()
        })
        .await
    }

    async fn fetch(
        &self,
        query: &LibraryQuery<'_>,
    ) -> Result<Vec<RemoteLibraryRecord>, CalilError> {
        let url = format!("{}/library", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&query.params(&self.api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalilError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let records = normalize_response(&body)?;

        if records.is_empty() {
            debug!(?query, "no libraries returned");
        } else {
            debug!(?query, count = records.len(), "libraries returned");
        }
        Ok(records)
    }
}

fn degrade(
    search: &str,
    result: Result<Vec<RemoteLibraryRecord>, CalilError>,
) -> Vec<RemoteLibraryRecord> {
    match result {
        Ok(records) => records,
        Err(e) => {
            warn!(search, kind = e.kind(), error = %e, "library search failed");
            Vec::new()
        }
    }
}

/// Keep records within `radius_m` of `origin`, in their original order.
pub fn filter_by_radius(
    records: Vec<RemoteLibraryRecord>,
    origin: &Coordinate,
    radius_m: f64,
) -> Vec<RemoteLibraryRecord> {
    records
        .into_iter()
        .filter(|r| {
            r.location()
                .is_some_and(|loc| within(distance_m(origin, &loc), radius_m))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(libid: &str, geocode: &str) -> RemoteLibraryRecord {
        serde_json::from_value(serde_json::json!({
            "libid": libid,
            "formal": libid,
            "geocode": geocode,
        }))
        .unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = CalilConfig::new("key");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = CalilConfig::new("key")
            .with_base_url("http://localhost:9000/")
            .with_timeout(3);
        assert_eq!(config.base_url, "http://localhost:9000/");
        assert_eq!(config.timeout_secs, 3);

        let client = CalilClient::new(config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9000");
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(
            CalilClient::new(CalilConfig::new("  ")),
            Err(CalilError::Config(_))
        ));
    }

    #[test]
    fn query_params_in_order() {
        let query = LibraryQuery {
            pref: Some("東京都"),
            city: Some("港区"),
            limit: Some(10),
            ..Default::default()
        };
        let params = query.params("k");
        let names: Vec<_> = params.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["key", "pref", "city", "format", "callback", "limit"]);
        assert!(params.contains(&("callback", "no".to_string())));
    }

    #[test]
    fn geocode_param_is_lon_lat() {
        let query = LibraryQuery {
            geocode: Some(Geocode::from_coordinate(Coordinate::new(35.5, 139.5))),
            ..Default::default()
        };
        assert!(query.params("k").contains(&("geocode", "139.5,35.5".to_string())));
    }

    #[test]
    fn radius_filter_drops_far_and_unlocated() {
        let origin = Coordinate::new(35.0, 139.0);
        let records = vec![
            record("near", "139.0,35.001"),
            record("far", "139.0,35.1"),
            record("nowhere", "not a geocode"),
            record("also-near", "139.001,35.0"),
        ];
        let kept = filter_by_radius(records, &origin, 500.0);
        let ids: Vec<_> = kept.iter().map(|r| r.libid.as_str()).collect();
        assert_eq!(ids, vec!["near", "also-near"]);
    }
}
