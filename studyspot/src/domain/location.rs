//! Study location records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

use super::hours::WeeklyHours;

/// Kind of study venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Library,
    Cafe,
    StudyRoom,
    Coworking,
    Public,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Library,
        Category::Cafe,
        Category::StudyRoom,
        Category::Coworking,
        Category::Public,
    ];

    /// Japanese display label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Library => "図書館",
            Category::Cafe => "カフェ",
            Category::StudyRoom => "自習室",
            Category::Coworking => "コワーキングスペース",
            Category::Public => "公共施設",
        }
    }

    /// The wire name, e.g. `study_room`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Library => "library",
            Category::Cafe => "cafe",
            Category::StudyRoom => "study_room",
            Category::Coworking => "coworking",
            Category::Public => "public",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a venue charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pricing {
    Free,
    Hourly {
        #[serde(rename = "hourlyRate", skip_serializing_if = "Option::is_none")]
        hourly_rate: Option<u32>,
        #[serde(rename = "dailyRate", skip_serializing_if = "Option::is_none")]
        daily_rate: Option<u32>,
    },
    Daily {
        #[serde(rename = "dailyRate", skip_serializing_if = "Option::is_none")]
        daily_rate: Option<u32>,
    },
}

impl Pricing {
    pub fn is_free(&self) -> bool {
        matches!(self, Pricing::Free)
    }

    /// Japanese display label. Rates in yen.
    pub fn label(&self) -> String {
        match self {
            Pricing::Free => "無料".to_string(),
            Pricing::Hourly {
                hourly_rate: Some(rate),
                ..
            } => format!("時間制 {rate}円/時間"),
            Pricing::Daily {
                daily_rate: Some(rate),
            } => format!("1日 {rate}円"),
            _ => "料金要確認".to_string(),
        }
    }
}

/// Optional contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Hours, pricing and contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub opening_hours: WeeklyHours,
    pub pricing: Pricing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

/// Facility flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facilities {
    pub wifi: bool,
    pub power: bool,
    pub food: bool,
    pub quiet: bool,
}

/// Review aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub average_rating: f64,
    pub review_count: u32,
    pub tags: BTreeMap<String, u32>,
}

impl Stats {
    /// Build stats from a rating, review count and `(tag, count)` pairs.
    pub fn new(average_rating: f64, review_count: u32, tags: &[(&str, u32)]) -> Self {
        Self {
            average_rating,
            review_count,
            tags: tags.iter().map(|(t, n)| ((*t).to_string(), *n)).collect(),
        }
    }
}

/// Remote-directory details carried by libraries sourced from Calil.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalilInfo {
    pub systemid: String,
    pub systemname: String,
    pub libkey: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// A study venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyLocation {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub address: String,
    pub coordinates: Coordinate,
    pub basic_info: BasicInfo,
    pub facilities: Facilities,
    pub stats: Stats,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calil_info: Option<CalilInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_wire_name() {
        for c in Category::ALL {
            assert_eq!(Category::parse(c.as_str()), Some(c));
        }
        assert_eq!(Category::parse("bar"), None);
        assert_eq!(Category::StudyRoom.to_string(), "study_room");
        assert_eq!(Category::Coworking.label(), "コワーキングスペース");
    }

    #[test]
    fn pricing_labels() {
        assert_eq!(Pricing::Free.label(), "無料");
        assert_eq!(
            Pricing::Hourly {
                hourly_rate: Some(300),
                daily_rate: None
            }
            .label(),
            "時間制 300円/時間"
        );
        assert_eq!(
            Pricing::Daily {
                daily_rate: Some(1500)
            }
            .label(),
            "1日 1500円"
        );
        assert_eq!(
            Pricing::Hourly {
                hourly_rate: None,
                daily_rate: None
            }
            .label(),
            "料金要確認"
        );
    }

    #[test]
    fn pricing_json_is_tagged_by_type() {
        let p: Pricing = serde_json::from_str(r#"{"type":"hourly","hourlyRate":500}"#).unwrap();
        assert_eq!(
            p,
            Pricing::Hourly {
                hourly_rate: Some(500),
                daily_rate: None
            }
        );
        let free: Pricing = serde_json::from_str(r#"{"type":"free"}"#).unwrap();
        assert!(free.is_free());
    }
}
