//! Study-spot finder.
//!
//! Helps a student find somewhere to study: libraries, cafes and study
//! rooms near them or within walking distance of the stations they use.
//! Library data comes from a small curated table and from the Calil
//! national library directory; stations from a built-in table plus the
//! HeartRails Express suggestion API.

pub mod domain;
pub mod geo;
pub mod libraries;
pub mod locations;
pub mod search;
pub mod stations;
pub mod walkable;
