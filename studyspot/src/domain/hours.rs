//! Opening hours and open/closed derivation.
//!
//! Hours are stored per weekday as free-form strings, normally
//! `"HH:MM-HH:MM"`. Times are compared as `HH*100+MM` integers, so
//! `"09:00"` is 900 and `"21:30"` is 2130. Anything that does not parse is
//! treated as closed.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Entries that mean "closed all day".
pub const CLOSED_MARKERS: [&str; 2] = ["休館", "closed"];

/// Label used when a venue is closed for the whole day.
pub const CLOSED_TODAY_LABEL: &str = "本日休館";

/// A time of day in `HH*100+MM` encoding.
///
/// The encoding preserves ordering, which is all the open/closed check needs.
///
/// # Examples
///
/// ```
/// use studyspot::domain::ClockTime;
///
/// let t = ClockTime::parse("09:30").unwrap();
/// assert_eq!(t.encoded(), 930);
/// assert_eq!(t.to_string(), "09:30");
/// assert!(ClockTime::parse("要確認").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Build from an already-encoded `HHMM` integer.
    pub const fn from_encoded(hhmm: u16) -> Self {
        ClockTime(hhmm)
    }

    /// Build from hour and minute.
    pub const fn from_hm(hour: u16, minute: u16) -> Self {
        ClockTime(hour * 100 + minute)
    }

    /// Parse `"HH:MM"` (or `"H:MM"`) by dropping the colon.
    ///
    /// Returns `None` when the remainder is not a plain integer.
    pub fn parse(s: &str) -> Option<Self> {
        let digits: String = s.trim().chars().filter(|c| *c != ':').collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(ClockTime)
    }

    /// The time of day of a local timestamp.
    pub fn of(now: &NaiveDateTime) -> Self {
        // hour < 24 and minute < 60, so the casts cannot truncate.
        ClockTime::from_hm(now.hour() as u16, now.minute() as u16)
    }

    /// The `HHMM` integer.
    pub fn encoded(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 100, self.0 % 100)
    }
}

/// One day's hours, interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayHours {
    /// Closed all day (closed marker or no entry).
    Closed,
    /// Open between the two bounds, both inclusive.
    Open { open: ClockTime, close: ClockTime },
    /// An entry that could not be read, such as `"要確認"`.
    Unparsed,
}

impl DayHours {
    /// Interpret a weekday entry.
    pub fn parse(entry: Option<&str>) -> Self {
        let Some(entry) = entry.map(str::trim) else {
            return DayHours::Closed;
        };

        if entry.is_empty() || CLOSED_MARKERS.contains(&entry) {
            return DayHours::Closed;
        }

        let Some((open, close)) = entry.split_once('-') else {
            return DayHours::Unparsed;
        };

        match (ClockTime::parse(open), ClockTime::parse(close)) {
            (Some(open), Some(close)) => DayHours::Open { open, close },
            _ => DayHours::Unparsed,
        }
    }

    /// Whether `now` falls inside these hours.
    pub fn is_open_at(&self, now: ClockTime) -> bool {
        match self {
            DayHours::Open { open, close } => *open <= now && now <= *close,
            DayHours::Closed | DayHours::Unparsed => false,
        }
    }
}

/// Standard weekly hours, one optional entry per weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thursday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunday: Option<String>,
}

impl WeeklyHours {
    /// Seven entries, Monday first.
    pub fn from_days(days: [&str; 7]) -> Self {
        let [mon, tue, wed, thu, fri, sat, sun] = days.map(|d| Some(d.to_string()));
        Self {
            monday: mon,
            tuesday: tue,
            wednesday: wed,
            thursday: thu,
            friday: fri,
            saturday: sat,
            sunday: sun,
        }
    }

    /// The same entry every day.
    pub fn every_day(hours: &str) -> Self {
        Self::from_days([hours; 7])
    }

    /// The raw entry for a weekday.
    pub fn get(&self, weekday: Weekday) -> Option<&str> {
        let entry = match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        };
        entry.as_deref()
    }

    /// The interpreted hours for a weekday.
    pub fn day(&self, weekday: Weekday) -> DayHours {
        DayHours::parse(self.get(weekday))
    }

    /// Open/closed status at a weekday and time.
    pub fn status_at(&self, weekday: Weekday, now: ClockTime) -> OpenStatus {
        let entry = self.get(weekday);
        let hours = DayHours::parse(entry);

        let today_label = match (hours, entry) {
            (DayHours::Closed, _) | (_, None) => CLOSED_TODAY_LABEL.to_string(),
            (_, Some(raw)) => format!("本日 {}", raw.trim()),
        };

        OpenStatus {
            is_open: hours.is_open_at(now),
            today_label,
        }
    }

    /// Open/closed status at a local timestamp.
    pub fn status_now(&self, now: &NaiveDateTime) -> OpenStatus {
        self.status_at(now.weekday(), ClockTime::of(now))
    }
}

/// Result of an open/closed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenStatus {
    pub is_open: bool,
    /// Human-readable summary of today's hours.
    pub today_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hhmm: u16) -> ClockTime {
        ClockTime::from_encoded(hhmm)
    }

    #[test]
    fn clock_time_parse() {
        assert_eq!(ClockTime::parse("09:00"), Some(t(900)));
        assert_eq!(ClockTime::parse("21:30"), Some(t(2130)));
        assert_eq!(ClockTime::parse("9:05"), Some(t(905)));
        assert_eq!(ClockTime::parse(""), None);
        assert_eq!(ClockTime::parse("ab:cd"), None);
    }

    #[test]
    fn day_hours_parse() {
        assert_eq!(DayHours::parse(None), DayHours::Closed);
        assert_eq!(DayHours::parse(Some("休館")), DayHours::Closed);
        assert_eq!(DayHours::parse(Some("closed")), DayHours::Closed);
        assert_eq!(DayHours::parse(Some("要確認")), DayHours::Unparsed);
        assert_eq!(DayHours::parse(Some("0900")), DayHours::Unparsed);
        assert_eq!(
            DayHours::parse(Some("09:00-20:00")),
            DayHours::Open {
                open: t(900),
                close: t(2000)
            }
        );
    }

    #[test]
    fn open_bounds_are_inclusive() {
        let hours = DayHours::parse(Some("09:00-20:00"));
        assert!(hours.is_open_at(t(1200)));
        assert!(!hours.is_open_at(t(830)));
        assert!(hours.is_open_at(t(900)));
        assert!(hours.is_open_at(t(2000)));
        assert!(!hours.is_open_at(t(2001)));
    }

    #[test]
    fn closed_marker_is_closed_at_any_time() {
        let week = WeeklyHours::from_days([
            "休館",
            "10:00-21:00",
            "10:00-21:00",
            "10:00-21:00",
            "10:00-21:00",
            "10:00-19:00",
            "10:00-17:00",
        ]);
        for hhmm in [0, 900, 1200, 2359] {
            let status = week.status_at(Weekday::Mon, t(hhmm));
            assert!(!status.is_open);
            assert_eq!(status.today_label, CLOSED_TODAY_LABEL);
        }
        let status = week.status_at(Weekday::Tue, t(1200));
        assert!(status.is_open);
        assert_eq!(status.today_label, "本日 10:00-21:00");
    }

    #[test]
    fn malformed_entry_is_closed_not_an_error() {
        let week = WeeklyHours::every_day("all day");
        let status = week.status_at(Weekday::Wed, t(1200));
        assert!(!status.is_open);
        assert_eq!(status.today_label, "本日 all day");
    }

    #[test]
    fn missing_entry_is_closed() {
        let week = WeeklyHours::default();
        let status = week.status_at(Weekday::Fri, t(1200));
        assert!(!status.is_open);
        assert_eq!(status.today_label, CLOSED_TODAY_LABEL);
    }

    #[test]
    fn status_now_uses_weekday_and_time() {
        // 2025-07-28 is a Monday.
        let monday_noon = chrono::NaiveDate::from_ymd_opt(2025, 7, 28)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let week = WeeklyHours::from_days([
            "休館",
            "09:00-20:00",
            "09:00-20:00",
            "09:00-20:00",
            "09:00-20:00",
            "09:00-17:00",
            "09:00-17:00",
        ]);
        assert!(!week.status_now(&monday_noon).is_open);

        let tuesday_noon = monday_noon + chrono::Duration::days(1);
        assert!(week.status_now(&tuesday_noon).is_open);
    }

    #[test]
    fn weekly_hours_json_uses_weekday_names() {
        let week: WeeklyHours =
            serde_json::from_str(r#"{"monday":"休館","tuesday":"09:00-19:00"}"#).unwrap();
        assert_eq!(week.get(Weekday::Mon), Some("休館"));
        assert_eq!(week.get(Weekday::Tue), Some("09:00-19:00"));
        assert_eq!(week.get(Weekday::Sun), None);
    }
}
