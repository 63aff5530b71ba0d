//! Built-in table of major stations.
//!
//! Used when no station file is configured. Coordinates are station
//! centroids to four decimal places.

use crate::geo::Coordinate;

use super::station::Station;

/// `(id, name, prefecture, line, operator, latitude, longitude)`
type Row = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    f64,
    f64,
);

#[rustfmt::skip]
const MAJOR_STATIONS: &[Row] = &[
    ("tokyo", "東京", "東京都", "JR山手線", "JR東日本", 35.6812, 139.7671),
    ("shinjuku", "新宿", "東京都", "JR山手線", "JR東日本", 35.6896, 139.7006),
    ("shibuya", "渋谷", "東京都", "JR山手線", "JR東日本", 35.6580, 139.7016),
    ("ikebukuro", "池袋", "東京都", "JR山手線", "JR東日本", 35.7295, 139.7109),
    ("ueno", "上野", "東京都", "JR山手線", "JR東日本", 35.7140, 139.7774),
    ("shinagawa", "品川", "東京都", "JR山手線", "JR東日本", 35.6284, 139.7387),
    ("akihabara", "秋葉原", "東京都", "JR山手線", "JR東日本", 35.6984, 139.7731),
    ("yurakucho", "有楽町", "東京都", "JR山手線", "JR東日本", 35.6751, 139.7634),
    ("ebisu", "恵比寿", "東京都", "JR山手線", "JR東日本", 35.6465, 139.7100),
    ("harajuku", "原宿", "東京都", "JR山手線", "JR東日本", 35.6702, 139.7026),
    ("yokohama", "横浜", "神奈川県", "JR東海道本線", "JR東日本", 35.4657, 139.6224),
    ("kawasaki", "川崎", "神奈川県", "JR東海道本線", "JR東日本", 35.5308, 139.6979),
    ("omiya", "大宮", "埼玉県", "JR東北本線", "JR東日本", 35.9063, 139.6244),
    ("urawa", "浦和", "埼玉県", "JR東北本線", "JR東日本", 35.8617, 139.6565),
    ("chiba", "千葉", "千葉県", "JR総武本線", "JR東日本", 35.6074, 140.1060),
    ("funabashi", "船橋", "千葉県", "JR総武本線", "JR東日本", 35.6952, 139.9839),
    ("machida", "町田", "東京都", "小田急小田原線", "小田急電鉄", 35.5424, 139.4267),
    ("kichijoji", "吉祥寺", "東京都", "JR中央線", "JR東日本", 35.7035, 139.5803),
    ("mitaka", "三鷹", "東京都", "JR中央線", "JR東日本", 35.6836, 139.5594),
    ("tachikawa", "立川", "東京都", "JR中央線", "JR東日本", 35.6986, 139.4141),
    ("osaka", "大阪", "大阪府", "JR東海道本線", "JR西日本", 34.7024, 135.4959),
    ("kyoto", "京都", "京都府", "JR東海道本線", "JR西日本", 34.9858, 135.7589),
    ("kobe", "神戸", "兵庫県", "JR東海道本線", "JR西日本", 34.6913, 135.1830),
    ("namba", "難波", "大阪府", "南海本線", "南海電鉄", 34.6659, 135.5003),
    ("tennoji", "天王寺", "大阪府", "JR大阪環状線", "JR西日本", 34.6458, 135.5144),
    ("nagoya", "名古屋", "愛知県", "JR東海道本線", "JR東海", 35.1709, 136.8815),
    ("sendai", "仙台", "宮城県", "JR東北本線", "JR東日本", 38.2606, 140.8819),
    ("hiroshima", "広島", "広島県", "JR山陽本線", "JR西日本", 34.3971, 132.4756),
    ("fukuoka", "博多", "福岡県", "JR鹿児島本線", "JR九州", 33.5904, 130.4208),
    ("sapporo", "札幌", "北海道", "JR函館本線", "JR北海道", 43.0642, 141.3469),
    ("sagamiono", "相模大野", "神奈川県", "小田急小田原線", "小田急電鉄", 35.5295, 139.4442),
    ("fujisawa", "藤沢", "神奈川県", "小田急江ノ島線", "小田急電鉄", 35.3409, 139.4839),
    ("shimo-kitazawa", "下北沢", "東京都", "小田急小田原線", "小田急電鉄", 35.6613, 139.6681),
    ("jiyugaoka", "自由が丘", "東京都", "東急東横線", "東急電鉄", 35.6084, 139.6686),
    ("musashikosugi", "武蔵小杉", "神奈川県", "東急東横線", "東急電鉄", 35.5781, 139.6565),
    ("nakameguro", "中目黒", "東京都", "東急東横線", "東急電鉄", 35.6444, 139.6990),
    ("keikyu-kamata", "京急蒲田", "東京都", "京急本線", "京急電鉄", 35.5616, 139.7164),
    ("kanazawa-bunko", "金沢文庫", "神奈川県", "京急本線", "京急電鉄", 35.3425, 139.6188),
    ("chofu", "調布", "東京都", "京王線", "京王電鉄", 35.6517, 139.5418),
    ("takahata-fudo", "高幡不動", "東京都", "京王線", "京王電鉄", 35.6597, 139.4053),
    ("kamakura", "鎌倉", "神奈川県", "JR東海道本線", "JR東日本", 35.3190, 139.5491),
    ("odawara", "小田原", "神奈川県", "JR東海道本線", "JR東日本", 35.2561, 139.1564),
    ("koganecho", "黄金町", "神奈川県", "京急本線", "京急電鉄", 35.4395, 139.6186),
    ("hinodecho", "日ノ出町", "神奈川県", "京急本線", "京急電鉄", 35.4456, 139.6234),
    ("nippori", "日暮里", "東京都", "JR山手線", "JR東日本", 35.7276, 139.7710),
    ("tabata", "田端", "東京都", "JR山手線", "JR東日本", 35.7377, 139.7608),
    ("komagome", "駒込", "東京都", "JR山手線", "JR東日本", 35.7364, 139.7465),
    ("sugamo", "巣鴨", "東京都", "JR山手線", "JR東日本", 35.7334, 139.7395),
    ("otsuka", "大塚", "東京都", "JR山手線", "JR東日本", 35.7314, 139.7289),
    ("mejiro", "目白", "東京都", "JR山手線", "JR東日本", 35.7215, 139.7066),
    ("takadanobaba", "高田馬場", "東京都", "JR山手線", "JR東日本", 35.7127, 139.7038),
    ("shimbashi", "新橋", "東京都", "JR山手線", "JR東日本", 35.6658, 139.7589),
    ("hamamatsucho", "浜松町", "東京都", "JR山手線", "JR東日本", 35.6556, 139.7569),
    ("tamachi", "田町", "東京都", "JR山手線", "JR東日本", 35.6455, 139.7479),
    ("osaki", "大崎", "東京都", "JR山手線", "JR東日本", 35.6197, 139.7280),
    ("gotanda", "五反田", "東京都", "JR山手線", "JR東日本", 35.6259, 139.7237),
    ("meguro", "目黒", "東京都", "JR山手線", "JR東日本", 35.6340, 139.7157),
    ("nishi-nippori", "西日暮里", "東京都", "JR山手線", "JR東日本", 35.7321, 139.7670),
];

/// The built-in stations, in table order.
pub fn major_stations() -> Vec<Station> {
    MAJOR_STATIONS
        .iter()
        .map(|&(id, name, prefecture, line, operator, lat, lon)| {
            Station::new(id, name, prefecture, line, operator, Coordinate::new(lat, lon))
        })
        .collect()
}
