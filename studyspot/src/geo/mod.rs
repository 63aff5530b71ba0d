//! Geospatial primitives.
//!
//! Coordinates, great-circle distance, and the walking-speed model used to
//! turn a walking-time budget into a distance threshold (and back).

mod geocode;

pub use geocode::{Geocode, InvalidGeocode};

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Assumed walking speed in meters per minute.
pub const WALKING_SPEED_M_PER_MIN: f64 = 80.0;

/// Slack allowed when comparing a computed distance against a threshold.
///
/// A point placed exactly on the threshold can come out of the Haversine
/// formula a few ULPs too far; it still counts as inside.
pub const BOUNDARY_TOLERANCE_M: f64 = 1e-6;

/// A point in decimal degrees (WGS84 assumed, not validated).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude, in that order.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_m(&self, other: &Coordinate) -> f64 {
        distance_m(self, other)
    }
}

/// Haversine great-circle distance between two coordinates, in meters.
///
/// Out-of-range inputs are not rejected; they go through the same formula.
///
/// # Examples
///
/// ```
/// use studyspot::geo::{Coordinate, distance_m};
///
/// let tokyo = Coordinate::new(35.6812, 139.7671);
/// assert_eq!(distance_m(&tokyo, &tokyo), 0.0);
///
/// let shinjuku = Coordinate::new(35.6896, 139.7006);
/// let d = distance_m(&tokyo, &shinjuku);
/// assert!((6_000.0..6_300.0).contains(&d));
/// ```
pub fn distance_m(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Haversine distance in kilometers.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    distance_m(a, b) / 1000.0
}

/// Minutes needed to walk `meters` at 80 m/min, rounded up.
///
/// Rounding up never understates a walk.
///
/// ```
/// use studyspot::geo::walking_minutes;
///
/// assert_eq!(walking_minutes(800.0), 10);
/// assert_eq!(walking_minutes(801.0), 11);
/// assert_eq!(walking_minutes(0.0), 0);
/// ```
pub fn walking_minutes(meters: f64) -> u32 {
    let minutes = (meters.max(0.0) / WALKING_SPEED_M_PER_MIN).ceil();
    // Saturating float-to-int cast.
    minutes as u32
}

/// Distance covered in `minutes` of walking at 80 m/min.
pub fn walking_distance_m(minutes: u32) -> f64 {
    f64::from(minutes) * WALKING_SPEED_M_PER_MIN
}

/// Whether `distance` is within `threshold`, both in meters, inclusive.
pub fn within(distance: f64, threshold: f64) -> bool {
    distance <= threshold + BOUNDARY_TOLERANCE_M
}
