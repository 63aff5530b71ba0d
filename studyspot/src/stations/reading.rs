//! Kana readings for station-name matching.
//!
//! Station names are kanji, but users often type a reading (よこはま), a
//! katakana form, or romaji. These small tables cover the busiest stations
//! only; everything else falls back to plain substring matching.

/// Hiragana readings of common station names.
const READINGS: &[(&str, &str)] = &[
    ("横浜", "よこはま"),
    ("新宿", "しんじゅく"),
    ("渋谷", "しぶや"),
    ("池袋", "いけぶくろ"),
    ("上野", "うえの"),
    ("秋葉原", "あきはばら"),
    ("品川", "しながわ"),
    ("東京", "とうきょう"),
    ("大宮", "おおみや"),
    ("川口", "かわぐち"),
    ("浦和", "うらわ"),
    ("船橋", "ふなばし"),
    ("柏", "かしわ"),
    ("松戸", "まつど"),
    ("町田", "まちだ"),
    ("吉祥寺", "きちじょうじ"),
    ("三鷹", "みたか"),
    ("調布", "ちょうふ"),
    ("藤沢", "ふじさわ"),
    ("大船", "おおふな"),
    ("鎌倉", "かまくら"),
    ("小田原", "おだわら"),
];

/// Romaji spellings that map onto a hiragana reading.
const ROMAJI: &[(&str, &str)] = &[
    ("yokohama", "よこはま"),
    ("shinjuku", "しんじゅく"),
    ("shibuya", "しぶや"),
    ("ikebukuro", "いけぶくろ"),
    ("ueno", "うえの"),
    ("akihabara", "あきはばら"),
    ("shinagawa", "しながわ"),
    ("tokyo", "とうきょう"),
    ("omiya", "おおみや"),
    ("kawaguchi", "かわぐち"),
];

/// The reading of a station name, or the lowercased name if unknown.
pub fn reading_of(name: &str) -> String {
    READINGS
        .iter()
        .find(|(kanji, _)| *kanji == name)
        .map(|(_, kana)| (*kana).to_string())
        .unwrap_or_else(|| name.to_lowercase())
}

/// Hiragana for a known romaji spelling, or the input unchanged.
pub fn romaji_to_hiragana(text: &str) -> String {
    ROMAJI
        .iter()
        .find(|(romaji, _)| *romaji == text)
        .map(|(_, kana)| (*kana).to_string())
        .unwrap_or_else(|| text.to_string())
}

/// Shift every hiragana character into the katakana block.
pub fn hiragana_to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}
