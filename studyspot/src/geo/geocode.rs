//! The "longitude,latitude" location string used by the library directory.

use std::fmt;
use std::str::FromStr;

use super::Coordinate;

/// Error returned when a geocode string does not hold a usable location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid geocode: {reason}")]
pub struct InvalidGeocode {
    reason: &'static str,
}

/// A parsed geocode.
///
/// The wire form is `"longitude,latitude"`, the reverse of the usual pair
/// order. Exactly two finite numbers are required.
///
/// # Examples
///
/// ```
/// use studyspot::geo::Geocode;
///
/// let g = Geocode::parse("139.7671,35.6812").unwrap();
/// assert_eq!(g.coordinate().latitude, 35.6812);
/// assert_eq!(g.coordinate().longitude, 139.7671);
///
/// assert!(Geocode::parse("").is_err());
/// assert!(Geocode::parse("139.7").is_err());
/// assert!(Geocode::parse("139.7,35.6,0").is_err());
/// assert!(Geocode::parse("east,north").is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Geocode(Coordinate);

impl Geocode {
    /// Parse a `"longitude,latitude"` string.
    pub fn parse(s: &str) -> Result<Self, InvalidGeocode> {
        let mut parts = s.split(',');

        let (Some(lon), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(InvalidGeocode {
                reason: "expected exactly two comma-separated components",
            });
        };

        let longitude = parse_component(lon)?;
        let latitude = parse_component(lat)?;

        Ok(Geocode(Coordinate::new(latitude, longitude)))
    }

    /// Build the wire form for a coordinate.
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Geocode(coordinate)
    }

    /// The location as a coordinate.
    pub fn coordinate(&self) -> Coordinate {
        self.0
    }
}

fn parse_component(s: &str) -> Result<f64, InvalidGeocode> {
    let value: f64 = s.trim().parse().map_err(|_| InvalidGeocode {
        reason: "component is not a number",
    })?;

    if !value.is_finite() {
        return Err(InvalidGeocode {
            reason: "component is not finite",
        });
    }

    Ok(value)
}

impl FromStr for Geocode {
    type Err = InvalidGeocode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Geocode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Geocode({self})")
    }
}

impl fmt::Display for Geocode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0.longitude, self.0.latitude)
    }
}
