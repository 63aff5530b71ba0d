//! Study locations: the sample dataset and the search-page filters.

use chrono::{NaiveDateTime, Utc, Weekday};
use serde::Serialize;

use crate::domain::{
    BasicInfo, Category, ClockTime, Contact, Facilities, OpenStatus, Pricing, Stats,
    StudyLocation, WeeklyHours,
};
use crate::geo::{Coordinate, distance_m, within};

/// Default distance limit for the location filter, in metres.
pub const DEFAULT_MAX_DISTANCE_M: f64 = 5_000.0;

struct SampleRow {
    id: &'static str,
    name: &'static str,
    category: Category,
    address: &'static str,
    lat: f64,
    lon: f64,
    hours: [&'static str; 7],
    pricing: Pricing,
    phone: &'static str,
    website: Option<&'static str>,
    facilities: Facilities,
    rating: f64,
    reviews: u32,
    tags: &'static [(&'static str, u32)],
}

const QUIET_DESK: Facilities = Facilities {
    wifi: true,
    power: true,
    food: false,
    quiet: true,
};

const SAMPLES: &[SampleRow] = &[
    SampleRow {
        id: "1",
        name: "新宿区立中央図書館",
        category: Category::Library,
        address: "東京都新宿区大久保3-1-1",
        lat: 35.7008,
        lon: 139.7003,
        hours: [
            "09:00-20:00",
            "09:00-20:00",
            "09:00-20:00",
            "09:00-20:00",
            "09:00-20:00",
            "09:00-17:00",
            "09:00-17:00",
        ],
        pricing: Pricing::Free,
        phone: "03-3208-2111",
        website: Some("https://www.library.shinjuku.tokyo.jp/"),
        facilities: QUIET_DESK,
        rating: 4.2,
        reviews: 15,
        tags: &[("静か", 12), ("Wi-Fi良好", 10), ("電源あり", 14), ("長時間OK", 8)],
    },
    SampleRow {
        id: "2",
        name: "ドトールコーヒー 新宿東口店",
        category: Category::Cafe,
        address: "東京都新宿区新宿3-24-3",
        lat: 35.6895,
        lon: 139.7006,
        hours: [
            "07:00-22:00",
            "07:00-22:00",
            "07:00-22:00",
            "07:00-22:00",
            "07:00-22:00",
            "07:00-22:00",
            "07:00-21:00",
        ],
        pricing: Pricing::Hourly {
            hourly_rate: Some(300),
            daily_rate: None,
        },
        phone: "03-3123-4567",
        website: None,
        facilities: Facilities {
            wifi: true,
            power: false,
            food: true,
            quiet: false,
        },
        rating: 3.8,
        reviews: 23,
        tags: &[("Wi-Fi良好", 18), ("アクセス良好", 20), ("安い", 15), ("電源あり", 5)],
    },
    SampleRow {
        id: "3",
        name: "スタディルームLEAF 新宿店",
        category: Category::StudyRoom,
        address: "東京都新宿区西新宿1-1-8",
        lat: 35.6896,
        lon: 139.6917,
        hours: [
            "08:00-23:00",
            "08:00-23:00",
            "08:00-23:00",
            "08:00-23:00",
            "08:00-23:00",
            "08:00-23:00",
            "08:00-22:00",
        ],
        pricing: Pricing::Hourly {
            hourly_rate: Some(500),
            daily_rate: Some(1500),
        },
        phone: "03-5321-1234",
        website: Some("https://studyroom-leaf.com/"),
        facilities: QUIET_DESK,
        rating: 4.5,
        reviews: 8,
        tags: &[("静か", 8), ("Wi-Fi良好", 7), ("電源あり", 8), ("長時間OK", 6)],
    },
    SampleRow {
        id: "4",
        name: "渋谷区立中央図書館",
        category: Category::Library,
        address: "東京都渋谷区宇田川町25-1",
        lat: 35.6598,
        lon: 139.6982,
        hours: [
            "休館",
            "10:00-21:00",
            "10:00-21:00",
            "10:00-21:00",
            "10:00-21:00",
            "10:00-19:00",
            "10:00-17:00",
        ],
        pricing: Pricing::Free,
        phone: "03-3463-1211",
        website: None,
        facilities: QUIET_DESK,
        rating: 4.0,
        reviews: 12,
        tags: &[("静か", 10), ("Wi-Fi良好", 8), ("電源あり", 11), ("アクセス良好", 9)],
    },
];

impl SampleRow {
    fn to_location(&self) -> StudyLocation {
        StudyLocation {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category,
            address: self.address.to_string(),
            coordinates: Coordinate::new(self.lat, self.lon),
            basic_info: BasicInfo {
                opening_hours: WeeklyHours::from_days(self.hours),
                pricing: self.pricing,
                contact: Some(Contact {
                    phone: Some(self.phone.to_string()),
                    website: self.website.map(str::to_string),
                }),
            },
            facilities: self.facilities,
            stats: Stats::new(self.rating, self.reviews, self.tags),
            created_at: Utc::now(),
            is_active: true,
            calil_info: None,
        }
    }
}

/// The sample dataset shown before any search.
pub fn sample_locations() -> Vec<StudyLocation> {
    SAMPLES.iter().map(SampleRow::to_location).collect()
}

/// Whether `hours` say a venue is open on `weekday` at `hhmm`.
pub fn is_open_at(hours: &WeeklyHours, weekday: Weekday, hhmm: u16) -> bool {
    hours
        .status_at(weekday, ClockTime::from_encoded(hhmm))
        .is_open
}

impl StudyLocation {
    /// Open status at a local time.
    pub fn open_status(&self, now: &NaiveDateTime) -> OpenStatus {
        self.basic_info.opening_hours.status_now(now)
    }
}

/// Filters from the search page.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFilter {
    /// Only applied when the user's location is known
    pub max_distance_m: f64,
    pub only_free: bool,
    /// Needs a reference time, see [`LocationFilter::apply`]
    pub only_open: bool,
    /// `None` means every category
    pub category: Option<Category>,
}

impl Default for LocationFilter {
    fn default() -> Self {
        Self {
            max_distance_m: DEFAULT_MAX_DISTANCE_M,
            only_free: false,
            only_open: false,
            category: None,
        }
    }
}

/// A location that passed the filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredLocation<'a> {
    pub location: &'a StudyLocation,
    /// Metres from the user, when their location is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
}

impl LocationFilter {
    /// Filter and order `locations`.
    ///
    /// With a user location, results farther than `max_distance_m` are
    /// dropped and the rest are sorted nearest first. Without one, input
    /// order is kept and distance is not considered.
    pub fn apply<'a>(
        &self,
        locations: &'a [StudyLocation],
        user_location: Option<&Coordinate>,
        now: &NaiveDateTime,
    ) -> Vec<FilteredLocation<'a>> {
        let mut results: Vec<FilteredLocation<'a>> = locations
            .iter()
            .filter(|l| !self.only_free || l.basic_info.pricing.is_free())
            .filter(|l| self.category.is_none_or(|c| l.category == c))
            .filter(|l| !self.only_open || l.open_status(now).is_open)
            .map(|location| FilteredLocation {
                location,
                distance_m: user_location.map(|u| distance_m(u, &location.coordinates)),
            })
            .filter(|r| r.distance_m.is_none_or(|d| within(d, self.max_distance_m)))
            .collect();

        if user_location.is_some() {
            results.sort_by(|a, b| {
                let a = a.distance_m.unwrap_or(f64::INFINITY);
                let b = b.distance_m.unwrap_or(f64::INFINITY);
                a.total_cmp(&b)
            });
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    fn ids<'a>(results: &[FilteredLocation<'a>]) -> Vec<&'a str> {
        results.iter().map(|r| r.location.id.as_str()).collect()
    }

    // 2025-07-14 is a Monday.
    fn monday_noon() -> NaiveDateTime {
        at(2025, 7, 14, 12, 0)
    }

    #[test]
    fn sample_dataset() {
        let locations = sample_locations();
        assert_eq!(locations.len(), 4);
        assert_eq!(locations[0].name, "新宿区立中央図書館");
        assert_eq!(locations[2].category, Category::StudyRoom);
        assert_eq!(locations[2].basic_info.pricing.label(), "時間制 500円/時間");
        assert_eq!(locations[0].stats.tags.get("静か"), Some(&12));
        assert!(locations.iter().all(|l| l.is_active));
    }

    #[test]
    fn no_filters_keeps_input_order() {
        let locations = sample_locations();
        let results = LocationFilter::default().apply(&locations, None, &monday_noon());
        assert_eq!(ids(&results), vec!["1", "2", "3", "4"]);
        assert!(results.iter().all(|r| r.distance_m.is_none()));
    }

    #[test]
    fn only_free() {
        let locations = sample_locations();
        let filter = LocationFilter {
            only_free: true,
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&locations, None, &monday_noon())), vec!["1", "4"]);
    }

    #[test]
    fn by_category() {
        let locations = sample_locations();
        let filter = LocationFilter {
            category: Some(Category::Cafe),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&locations, None, &monday_noon())), vec!["2"]);
    }

    #[test]
    fn user_location_sorts_and_limits() {
        let locations = sample_locations();
        // Near Shinjuku station.
        let user = Coordinate::new(35.6896, 139.7006);
        let filter = LocationFilter {
            max_distance_m: 2_000.0,
            ..Default::default()
        };

        let results = filter.apply(&locations, Some(&user), &monday_noon());
        // Shibuya is about 3.3 km away.
        assert_eq!(ids(&results), vec!["2", "3", "1"]);
        assert!(results.windows(2).all(|w| w[0].distance_m <= w[1].distance_m));
    }

    #[test]
    fn only_open_uses_weekday_hours() {
        let locations = sample_locations();
        let filter = LocationFilter {
            only_open: true,
            ..Default::default()
        };

        // Shibuya closes on Mondays.
        assert_eq!(ids(&filter.apply(&locations, None, &monday_noon())), vec!["1", "2", "3"]);
        // 2025-07-15 is a Tuesday; at 22:30 only the study room is open.
        let late = at(2025, 7, 15, 22, 30);
        assert_eq!(ids(&filter.apply(&locations, None, &late)), vec!["3"]);
    }

    #[test]
    fn is_open_at_follows_hours() {
        let hours = WeeklyHours::every_day("09:00-20:00");
        assert!(is_open_at(&hours, Weekday::Wed, 1200));
        assert!(!is_open_at(&hours, Weekday::Wed, 830));
        assert!(is_open_at(&hours, Weekday::Wed, 2000));

        let shibuya = &sample_locations()[3];
        assert!(!is_open_at(&shibuya.basic_info.opening_hours, Weekday::Mon, 1200));
        assert!(is_open_at(&shibuya.basic_info.opening_hours, Weekday::Tue, 1200));
    }

    #[test]
    fn open_status_label() {
        let shibuya = &sample_locations()[3];
        let status = shibuya.open_status(&monday_noon());
        assert!(!status.is_open);
        assert_eq!(status.today_label, "本日休館");
    }
}
