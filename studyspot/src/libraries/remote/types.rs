//! Calil library records.

use std::fmt;

use chrono::Utc;
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{
    BasicInfo, CalilInfo, Category, Contact, Facilities, Pricing, Stats, StudyLocation,
    WeeklyHours,
};
use crate::geo::{Coordinate, Geocode, InvalidGeocode};

/// Calil web front end, used for deep links.
const CALIL_WEB_BASE: &str = "https://calil.jp";

/// Hours placeholder for libraries whose hours are not known.
const HOURS_UNKNOWN: &str = "要確認";

/// Library size/type as classified by Calil.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LibraryCategory {
    /// Reading room or community-centre library
    Small,
    /// Local library
    Medium,
    /// Regional library
    Large,
    /// University library
    Univ,
    /// Special-purpose library
    Special,
    /// Mobile library (bookmobile)
    Bm,
    /// Anything Calil adds later
    #[default]
    #[serde(other)]
    Unknown,
}

impl LibraryCategory {
    /// Japanese display label.
    pub fn label(&self) -> &'static str {
        match self {
            LibraryCategory::Small => "図書室・公民館",
            LibraryCategory::Medium => "図書館(地域)",
            LibraryCategory::Large => "図書館(広域)",
            LibraryCategory::Univ => "大学図書館",
            LibraryCategory::Special => "専門図書館",
            LibraryCategory::Bm => "移動図書館",
            LibraryCategory::Unknown => "図書館",
        }
    }

    /// The wire code, e.g. `UNIV`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryCategory::Small => "SMALL",
            LibraryCategory::Medium => "MEDIUM",
            LibraryCategory::Large => "LARGE",
            LibraryCategory::Univ => "UNIV",
            LibraryCategory::Special => "SPECIAL",
            LibraryCategory::Bm => "BM",
            LibraryCategory::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for LibraryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One library from the Calil directory.
///
/// Field names follow the wire format. Text fields accept strings or
/// numbers, and `null` reads as empty, so one sparse entry never fails the
/// whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteLibraryRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub systemid: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub systemname: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub libkey: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub libid: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub short: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub formal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_pc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pref: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub post: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tel: Option<String>,
    /// `"longitude,latitude"`
    #[serde(default, deserialize_with = "lenient_string")]
    pub geocode: String,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: LibraryCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Distance from the query point, present on geocode searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl RemoteLibraryRecord {
    /// Parse the geocode field.
    pub fn geocode(&self) -> Result<Geocode, InvalidGeocode> {
        Geocode::parse(&self.geocode)
    }

    /// The library's location, or `None` when the geocode is unusable.
    pub fn location(&self) -> Option<Coordinate> {
        self.geocode().ok().map(|g| g.coordinate())
    }

    /// Link to the library's page on calil.jp.
    pub fn calil_page_url(&self) -> Option<Url> {
        library_page_url(&self.libid, &self.formal)
    }

    /// Link to Calil's book search scoped to this library.
    pub fn calil_search_url(&self) -> Option<Url> {
        library_search_url(&self.systemid, &self.libkey)
    }

    /// Convert to a study location.
    ///
    /// Returns `None` when the record has no usable location.
    pub fn to_study_location(&self) -> Option<StudyLocation> {
        let coordinates = self.location()?;

        Some(StudyLocation {
            id: self.libid.clone(),
            name: self.formal.clone(),
            category: Category::Library,
            address: self.address.clone(),
            coordinates,
            basic_info: BasicInfo {
                opening_hours: WeeklyHours::every_day(HOURS_UNKNOWN),
                pricing: Pricing::Free,
                contact: Some(Contact {
                    phone: self.tel.clone(),
                    website: self.url_pc.clone(),
                }),
            },
            facilities: Facilities {
                wifi: true,
                power: true,
                food: false,
                quiet: true,
            },
            stats: Stats::new(4.0, 0, &[("静か", 8), ("無料", 10), ("アクセス良好", 6)]),
            created_at: Utc::now(),
            is_active: true,
            calil_info: Some(CalilInfo {
                systemid: self.systemid.clone(),
                systemname: self.systemname.clone(),
                libkey: self.libkey.clone(),
                category: self.category.as_str().to_string(),
                distance: self.distance,
            }),
        })
    }
}

/// `https://calil.jp/library/{libid}/{name}`
pub fn library_page_url(libid: &str, name: &str) -> Option<Url> {
    let mut url = Url::parse(CALIL_WEB_BASE).ok()?;
    url.path_segments_mut().ok()?.extend(["library", libid, name]);
    Some(url)
}

/// `https://calil.jp/library/search?s={systemid}&k={libkey}`
pub fn library_search_url(systemid: &str, libkey: &str) -> Option<Url> {
    Url::parse_with_params(
        &format!("{CALIL_WEB_BASE}/library/search"),
        &[("s", systemid), ("k", libkey)],
    )
    .ok()
}

/// `https://calil.jp/book/{isbn}`
pub fn book_url(isbn: &str) -> Option<Url> {
    let mut url = Url::parse(CALIL_WEB_BASE).ok()?;
    url.path_segments_mut().ok()?.extend(["book", isbn]);
    Some(url)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
    Null,
}

impl StringOrNumber {
    fn into_option(self) -> Option<String> {
        match self {
            StringOrNumber::Text(s) => Some(s),
            StringOrNumber::Number(n) => Some(n.to_string()),
            StringOrNumber::Null => None,
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(StringOrNumber::deserialize(d)?
        .into_option()
        .unwrap_or_default())
}

fn lenient_category<'de, D: Deserializer<'de>>(d: D) -> Result<LibraryCategory, D::Error> {
    Ok(Option::<LibraryCategory>::deserialize(d)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(StringOrNumber::deserialize(d)?.into_option())
}
