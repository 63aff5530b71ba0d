//! HeartRails Express station suggestion client.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::geo::Coordinate;

use super::error::StationError;
use super::station::Station;

/// Default base URL for HeartRails Express.
const DEFAULT_BASE_URL: &str = "https://express.heartrails.com";

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub struct SuggestResponse {
    pub response: SuggestBody,
}

/// Body of a `getStations` response.
///
/// On no match the API sends an `error` string instead of a station list.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestBody {
    #[serde(default)]
    pub station: Vec<StationSuggestionDto>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One suggested station as sent by the API.
///
/// `x` is longitude and `y` is latitude. Both may arrive as numbers or as
/// numeric strings.
#[derive(Debug, Clone, Deserialize)]
pub struct StationSuggestionDto {
    pub name: String,
    #[serde(default)]
    pub prefecture: String,
    #[serde(default)]
    pub line: String,
    pub x: NumberOrString,
    pub y: NumberOrString,
    #[serde(default)]
    pub postal: Option<String>,
}

/// A JSON number that is sometimes quoted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumberOrString::Number(n) => *n,
            NumberOrString::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl StationSuggestionDto {
    /// Convert to a [`Station`], or `None` without usable coordinates.
    pub fn into_station(self) -> Option<Station> {
        let longitude = self.x.as_f64()?;
        let latitude = self.y.as_f64()?;

        Some(Station {
            id: format!("{}-{}", self.line, self.name),
            // The API has no operator field; the line name stands in.
            operator: self.line.clone(),
            name: self.name,
            prefecture: self.prefecture,
            line: self.line,
            coordinates: Coordinate::new(latitude, longitude),
            city: None,
            postal_code: self.postal,
        })
    }
}

/// Configuration for the suggestion client.
#[derive(Debug, Clone)]
pub struct StationSuggestConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationSuggestConfig {
    pub fn new() -> Self {
        Self {
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

impl Default for StationSuggestConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for HeartRails Express `getStations`.
#[derive(Debug, Clone)]
pub struct StationSuggestClient {
    http: reqwest::Client,
    base_url: String,
}

impl StationSuggestClient {
    pub fn new(config: StationSuggestConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Suggest stations by name.
    ///
    /// Failures are logged and become an empty list.
    pub async fn suggest(&self, query: &str) -> Vec<Station> {
        match self.suggest_strict(query).await {
            Ok(stations) => stations,
            Err(e) => {
                warn!(query, error = %e, "station suggestion failed");
                Vec::new()
            }
        }
    }

    /// Suggest stations by name, reporting failures.
    ///
    /// A blank query (after cleaning) returns an empty list without a request.
    pub async fn suggest_strict(&self, query: &str) -> Result<Vec<Station>, StationError> {
        let cleaned = clean_query(query);
        if cleaned.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("method", "getStations"), ("name", cleaned)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let stations = parse_suggestions(&body)?;

        debug!(query = cleaned, count = stations.len(), "station suggestions");
        Ok(stations)
    }
}

/// Trim and drop a trailing 駅 ("station").
pub fn clean_query(query: &str) -> &str {
    let trimmed = query.trim();
    trimmed.strip_suffix('駅').unwrap_or(trimmed).trim_end()
}

/// Decode a `getStations` response body.
pub fn parse_suggestions(body: &str) -> Result<Vec<Station>, StationError> {
    let response: SuggestResponse =
        serde_json::from_str(body).map_err(|e| StationError::Json {
            message: e.to_string(),
        })?;

    if let Some(error) = &response.response.error {
        debug!(error = %error, "no stations matched");
    }

    Ok(response
        .response
        .station
        .into_iter()
        .filter_map(StationSuggestionDto::into_station)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StationSuggestConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_base_url() {
        let config = StationSuggestConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn clean_query_strips_station_suffix() {
        assert_eq!(clean_query(" 横浜駅 "), "横浜");
        assert_eq!(clean_query("横浜"), "横浜");
        assert_eq!(clean_query("駅"), "");
        assert_eq!(clean_query("   "), "");
    }

    #[test]
    fn parse_transposes_x_and_y() {
        let body = r#"{"response":{"station":[
            {"name":"横浜","prefecture":"神奈川県","line":"JR東海道本線","x":139.622,"y":35.4657,"postal":"2200011"},
            {"name":"横浜","prefecture":"神奈川県","line":"東急東横線","x":"139.6237","y":"35.4660"}
        ]}}"#;
        let stations = parse_suggestions(body).unwrap();
        assert_eq!(stations.len(), 2);

        assert_eq!(stations[0].id, "JR東海道本線-横浜");
        assert_eq!(stations[0].operator, "JR東海道本線");
        assert_eq!(stations[0].coordinates, Coordinate::new(35.4657, 139.622));
        assert_eq!(stations[0].postal_code.as_deref(), Some("2200011"));

        assert_eq!(stations[1].coordinates, Coordinate::new(35.4660, 139.6237));
    }

    #[test]
    fn parse_error_body_is_empty() {
        let body = r#"{"response":{"error":"Station not found."}}"#;
        assert!(parse_suggestions(body).unwrap().is_empty());
    }

    #[test]
    fn parse_skips_unusable_coordinates() {
        let body = r#"{"response":{"station":[
            {"name":"A","prefecture":"X","line":"L","x":"?","y":"35.0"}
        ]}}"#;
        assert!(parse_suggestions(body).unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(matches!(
            parse_suggestions("not json"),
            Err(StationError::Json { .. })
        ));
    }

    #[test]
    fn client_creation() {
        assert!(StationSuggestClient::new(StationSuggestConfig::new()).is_ok());
    }
}
