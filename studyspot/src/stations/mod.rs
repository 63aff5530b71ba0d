//! Station directory and station suggestions.
//!
//! The directory is an in-memory table (built-in or loaded from JSON) that
//! answers name, prefecture, operator, id and proximity queries. The
//! suggestion client looks station names up in HeartRails Express and
//! degrades to an empty list when the API is unavailable.

mod client;
mod data;
mod directory;
mod error;
mod reading;
mod station;

pub use client::{StationSuggestClient, StationSuggestConfig, clean_query, parse_suggestions};
pub use directory::{NAME_SEARCH_LIMIT, StationDirectory};
pub use error::StationError;
pub use station::{NearbyStation, Station};
