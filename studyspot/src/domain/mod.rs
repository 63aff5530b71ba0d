//! Domain types for study locations.
//!
//! Venue records, weekly opening hours, and the open/closed rule. Records
//! are built from static tables or API responses and are not mutated
//! afterwards.

mod error;
mod hours;
mod location;

pub use error::DomainError;
pub use hours::{CLOSED_MARKERS, CLOSED_TODAY_LABEL, ClockTime, DayHours, OpenStatus, WeeklyHours};
pub use location::{
    BasicInfo, CalilInfo, Category, Contact, Facilities, Pricing, Stats, StudyLocation,
};
