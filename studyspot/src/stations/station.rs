//! Station records.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A train station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub prefecture: String,
    pub line: String,
    pub operator: String,
    #[serde(flatten)]
    pub coordinates: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Station {
    /// Create a station with no city or postal code.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        prefecture: impl Into<String>,
        line: impl Into<String>,
        operator: impl Into<String>,
        coordinates: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prefecture: prefecture.into(),
            line: line.into(),
            operator: operator.into(),
            coordinates,
            city: None,
            postal_code: None,
        }
    }
}

/// A station together with its distance from a query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyStation {
    pub station: Station,
    /// Distance in meters.
    pub distance: f64,
}
