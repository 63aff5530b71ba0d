//! User-facing messages for searches that produced nothing.

use std::fmt;

use serde::{Serialize, Serializer};

/// Which kind of search failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Nearby,
    Prefecture,
    City,
    Station,
}

/// Why a search has no results, phrased for the user.
///
/// Serializes as the display message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAdvisory {
    /// Nearby search without a known position
    LocationUnavailable,
    PrefectureRequired,
    CityRequired,
    /// Station search with no resolvable station selected
    StationRequired,
    /// Station search ran but nothing is within the walking budget
    NothingNearStations { walking_minutes: u32 },
    /// The remote directory could not be reached or understood
    SearchFailed(SearchKind),
}

impl fmt::Display for SearchAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchAdvisory::LocationUnavailable => f.write_str("位置情報が取得できません"),
            SearchAdvisory::PrefectureRequired => f.write_str("都道府県を選択してください"),
            SearchAdvisory::CityRequired => f.write_str("市区町村を入力してください"),
            SearchAdvisory::StationRequired => f.write_str("駅を選択してください"),
            SearchAdvisory::NothingNearStations { walking_minutes } => write!(
                f,
                "選択された駅から徒歩{walking_minutes}分以内に図書館が見つかりませんでした"
            ),
            SearchAdvisory::SearchFailed(kind) => f.write_str(match kind {
                SearchKind::Nearby => "近隣図書館の検索に失敗しました",
                SearchKind::Prefecture => "都道府県での検索に失敗しました",
                SearchKind::City => "市区町村での検索に失敗しました",
                SearchKind::Station => "駅周辺での検索に失敗しました",
            }),
        }
    }
}

impl Serialize for SearchAdvisory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
