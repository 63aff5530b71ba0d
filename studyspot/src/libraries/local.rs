//! Curated directory of major libraries.
//!
//! A fixed table with standard weekly hours. Status is derived from those
//! hours; special closures come from a mocked calendar until a real feed
//! exists.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc, Weekday};
use serde::Serialize;

use crate::domain::{
    BasicInfo, Category, ClockTime, Contact, DomainError, Facilities, OpenStatus, Pricing, Stats,
    StudyLocation, WeeklyHours,
};
use crate::geo::{Coordinate, distance_m, within};

/// Who runs a library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryKind {
    Prefectural,
    Municipal,
}

/// A library in the curated table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorLibrary {
    pub id: String,
    pub name: String,
    pub prefecture: String,
    pub city: String,
    pub address: String,
    pub coordinates: Coordinate,
    pub phone: String,
    pub website: String,
    pub standard_hours: WeeklyHours,
    /// Free-text descriptions such as "第2木曜日".
    pub regular_closed_days: Vec<String>,
    pub category: LibraryKind,
}

struct Row {
    id: &'static str,
    name: &'static str,
    prefecture: &'static str,
    city: &'static str,
    address: &'static str,
    lat: f64,
    lon: f64,
    phone: &'static str,
    website: &'static str,
    hours: [&'static str; 7],
    closed: &'static [&'static str],
    category: LibraryKind,
}

const ROWS: &[Row] = &[
    Row {
        id: "tokyo_central",
        name: "東京都立中央図書館",
        prefecture: "東京都",
        city: "港区",
        address: "東京都港区南麻布5-7-13",
        lat: 35.6547,
        lon: 139.7389,
        phone: "03-3442-8451",
        website: "https://www.library.metro.tokyo.lg.jp/",
        hours: [
            "10:00-20:00",
            "10:00-20:00",
            "10:00-20:00",
            "10:00-20:00",
            "10:00-20:00",
            "10:00-17:00",
            "10:00-17:00",
        ],
        closed: &["第1・3・5木曜日", "年末年始", "特別整理期間"],
        category: LibraryKind::Prefectural,
    },
    Row {
        id: "shinjuku_central",
        name: "新宿区立中央図書館",
        prefecture: "東京都",
        city: "新宿区",
        address: "東京都新宿区大久保3-1-1",
        lat: 35.7008,
        lon: 139.7003,
        phone: "03-3208-2111",
        website: "https://www.library.shinjuku.tokyo.jp/",
        hours: [
            "09:00-21:30",
            "09:00-21:30",
            "09:00-21:30",
            "09:00-21:30",
            "09:00-21:30",
            "09:00-19:00",
            "09:00-19:00",
        ],
        closed: &["第2木曜日", "年末年始", "特別整理期間"],
        category: LibraryKind::Municipal,
    },
    Row {
        id: "shibuya_central",
        name: "渋谷区立中央図書館",
        prefecture: "東京都",
        city: "渋谷区",
        address: "東京都渋谷区宇田川町25-1",
        lat: 35.6598,
        lon: 139.6982,
        phone: "03-3463-1211",
        website: "https://www.lib.city.shibuya.tokyo.jp/",
        hours: [
            "休館",
            "10:00-21:00",
            "10:00-21:00",
            "10:00-21:00",
            "10:00-21:00",
            "10:00-19:00",
            "10:00-17:00",
        ],
        closed: &["月曜日", "第2・4木曜日", "年末年始", "特別整理期間"],
        category: LibraryKind::Municipal,
    },
    Row {
        id: "kanagawa_prefectural",
        name: "神奈川県立図書館",
        prefecture: "神奈川県",
        city: "横浜市",
        address: "神奈川県横浜市西区紅葉ヶ丘9-2",
        lat: 35.4437,
        lon: 139.6244,
        phone: "045-263-5900",
        website: "https://www.klnet.pref.kanagawa.jp/",
        hours: [
            "休館",
            "09:00-19:00",
            "09:00-19:00",
            "09:00-19:00",
            "09:00-19:00",
            "09:00-17:00",
            "09:00-17:00",
        ],
        closed: &["月曜日", "第2木曜日", "年末年始", "特別整理期間"],
        category: LibraryKind::Prefectural,
    },
];

static MAJOR_LIBRARIES: LazyLock<Vec<MajorLibrary>> = LazyLock::new(|| {
    ROWS.iter()
        .map(|r| MajorLibrary {
            id: r.id.to_string(),
            name: r.name.to_string(),
            prefecture: r.prefecture.to_string(),
            city: r.city.to_string(),
            address: r.address.to_string(),
            coordinates: Coordinate::new(r.lat, r.lon),
            phone: r.phone.to_string(),
            website: r.website.to_string(),
            standard_hours: WeeklyHours::from_days(r.hours),
            regular_closed_days: r.closed.iter().map(|d| (*d).to_string()).collect(),
            category: r.category,
        })
        .collect()
});

/// The curated libraries, in table order.
pub fn major_libraries() -> &'static [MajorLibrary] {
    &MAJOR_LIBRARIES
}

/// Look up a curated library by id.
pub fn find_library(library_id: &str) -> Option<&'static MajorLibrary> {
    major_libraries().iter().find(|l| l.id == library_id)
}

/// Curated libraries in a prefecture (exact match).
pub fn libraries_in_prefecture(prefecture: &str) -> Vec<&'static MajorLibrary> {
    major_libraries()
        .iter()
        .filter(|l| l.prefecture == prefecture)
        .collect()
}

/// Current status of a library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStatus {
    pub is_open: bool,
    pub today_hours: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_notice: Option<String>,
    pub last_updated: NaiveDateTime,
}

/// Open/closed status of a curated library at local time `now`.
pub fn check_status(library_id: &str, now: NaiveDateTime) -> Result<LibraryStatus, DomainError> {
    let library = find_library(library_id)
        .ok_or_else(|| DomainError::LibraryNotFound(library_id.to_string()))?;
    Ok(library.status_at(now))
}

/// The status rule on its own: weekday entry, `HHMM` time.
pub fn check_status_at(hours: &WeeklyHours, weekday: Weekday, hhmm: u16) -> OpenStatus {
    hours.status_at(weekday, ClockTime::from_encoded(hhmm))
}

impl MajorLibrary {
    /// Status at local time `now`.
    pub fn status_at(&self, now: NaiveDateTime) -> LibraryStatus {
        let OpenStatus {
            is_open,
            today_label,
        } = self.standard_hours.status_now(&now);

        LibraryStatus {
            is_open,
            today_hours: today_label,
            special_notice: None,
            last_updated: now,
        }
    }

    /// Convert to a study location with library defaults.
    pub fn to_study_location(&self) -> StudyLocation {
        StudyLocation {
            id: self.id.clone(),
            name: self.name.clone(),
            category: Category::Library,
            address: self.address.clone(),
            coordinates: self.coordinates,
            basic_info: BasicInfo {
                opening_hours: self.standard_hours.clone(),
                pricing: Pricing::Free,
                contact: Some(Contact {
                    phone: Some(self.phone.clone()),
                    website: Some(self.website.clone()),
                }),
            },
            facilities: Facilities {
                wifi: true,
                power: true,
                food: false,
                quiet: true,
            },
            stats: Stats::new(
                4.0,
                0,
                &[("静か", 10), ("Wi-Fi良好", 8), ("電源あり", 9), ("無料", 10)],
            ),
            created_at: Utc::now(),
            is_active: true,
            calil_info: None,
        }
    }
}

/// A curated library and its distance from a query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyLibrary {
    pub library: &'static MajorLibrary,
    /// Distance in meters.
    pub distance: f64,
}

/// Curated libraries within `radius_m` of `origin`, in table order.
pub fn search_nearby(origin: &Coordinate, radius_m: f64) -> Vec<NearbyLibrary> {
    major_libraries()
        .iter()
        .map(|library| NearbyLibrary {
            library,
            distance: distance_m(origin, &library.coordinates),
        })
        .filter(|n| within(n.distance, radius_m))
        .collect()
}

/// Kind of calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarEventKind {
    Closed,
    SpecialHours,
    Event,
}

/// A dated closure, hours change, or event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: CalendarEventKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_hours: Option<String>,
}

/// Calendar for a curated library, optionally limited to one month (1-12).
///
/// The data is a fixed sample; no library publishes a feed yet.
pub fn library_calendar(
    library_id: &str,
    month: Option<u32>,
) -> Result<Vec<CalendarEvent>, DomainError> {
    if find_library(library_id).is_none() {
        return Err(DomainError::LibraryNotFound(library_id.to_string()));
    }

    Ok(sample_calendar()
        .into_iter()
        .filter(|e| month.is_none_or(|m| e.date.month() == m))
        .collect())
}

fn sample_calendar() -> Vec<CalendarEvent> {
    let event = |y, m, d, kind, description: &str, special_hours: Option<&str>| {
        NaiveDate::from_ymd_opt(y, m, d).map(|date| CalendarEvent {
            date,
            kind,
            description: description.to_string(),
            special_hours: special_hours.map(str::to_string),
        })
    };

    [
        event(2025, 7, 29, CalendarEventKind::Closed, "施設点検のため休館", None),
        event(
            2025,
            8,
            5,
            CalendarEventKind::SpecialHours,
            "夏祭りイベント",
            Some("10:00-15:00"),
        ),
        event(2025, 8, 15, CalendarEventKind::Closed, "お盆休み", None),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    #[test]
    fn table_loads() {
        assert_eq!(major_libraries().len(), 4);
        assert_eq!(libraries_in_prefecture("東京都").len(), 3);
        assert_eq!(libraries_in_prefecture("神奈川県").len(), 1);
    }

    #[test]
    fn unknown_library_is_an_error() {
        let err = check_status("nowhere", at(2025, 7, 29, 12, 0)).unwrap_err();
        assert_eq!(err, DomainError::LibraryNotFound("nowhere".into()));
    }

    #[test]
    fn closed_marker_day_is_closed_all_day() {
        // 2025-07-28 is a Monday; Shibuya is closed on Mondays.
        for hour in [0, 10, 12, 20] {
            let status = check_status("shibuya_central", at(2025, 7, 28, hour, 0)).unwrap();
            assert!(!status.is_open);
            assert_eq!(status.today_hours, "本日休館");
        }
    }

    #[test]
    fn open_during_hours() {
        // Tuesday, 12:00, Tokyo Central open 10:00-20:00.
        let status = check_status("tokyo_central", at(2025, 7, 29, 12, 0)).unwrap();
        assert!(status.is_open);
        assert_eq!(status.today_hours, "本日 10:00-20:00");
        assert_eq!(status.last_updated, at(2025, 7, 29, 12, 0));
    }

    #[test]
    fn status_rule_boundaries() {
        let hours = WeeklyHours::every_day("09:00-20:00");
        assert!(check_status_at(&hours, Weekday::Thu, 1200).is_open);
        assert!(!check_status_at(&hours, Weekday::Thu, 830).is_open);
        assert!(check_status_at(&hours, Weekday::Thu, 2000).is_open);
        assert!(!check_status_at(&hours, Weekday::Thu, 2001).is_open);
    }

    #[test]
    fn malformed_hours_are_closed() {
        let hours = WeeklyHours::every_day("09:00");
        assert!(!check_status_at(&hours, Weekday::Thu, 1200).is_open);
    }

    #[test]
    fn nearby_uses_meters() {
        let shinjuku_station = Coordinate::new(35.6896, 139.7006);
        let near = search_nearby(&shinjuku_station, 2_000.0);
        let ids: Vec<_> = near.iter().map(|n| n.library.id.as_str()).collect();
        assert_eq!(ids, vec!["shinjuku_central"]);

        let wide = search_nearby(&shinjuku_station, 50_000.0);
        assert_eq!(wide.len(), 4);
    }

    #[test]
    fn calendar_month_filter() {
        assert_eq!(library_calendar("tokyo_central", None).unwrap().len(), 3);
        let august = library_calendar("tokyo_central", Some(8)).unwrap();
        assert_eq!(august.len(), 2);
        assert_eq!(august[0].kind, CalendarEventKind::SpecialHours);
        assert_eq!(august[0].special_hours.as_deref(), Some("10:00-15:00"));
        assert!(library_calendar("tokyo_central", Some(1)).unwrap().is_empty());
        assert!(library_calendar("nowhere", None).is_err());
    }

    #[test]
    fn converts_to_study_location() {
        let loc = find_library("kanagawa_prefectural").unwrap().to_study_location();
        assert_eq!(loc.category, Category::Library);
        assert!(loc.basic_info.pricing.is_free());
        assert_eq!(
            loc.basic_info.opening_hours.get(Weekday::Mon),
            Some("休館")
        );
        assert!(loc.facilities.quiet);
        assert_eq!(loc.stats.tags.get("無料"), Some(&10));
    }
}
