//! Application constants for the facility processor
//!
//! This module contains the dataset source locations, header label tables,
//! cleaning sentinels, and geospatial constants used throughout the library.

// =============================================================================
// Dataset Sources
// =============================================================================

/// Primary production dataset location (municipal open-data portal)
pub const PRIMARY_DATASET_URL: &str =
    "https://www.city.nagaoka.niigata.jp/opendata/files/kosodate_shisetsu.csv";

/// Bundled sample dataset, tried last when every network source fails
pub const BUNDLED_SAMPLE_PATH: &str = "data/sample_facilities.csv";

/// Environment variable naming an override source location
pub const ENV_SOURCE_URL: &str = "FACILITY_CSV_URL";

/// Environment variable naming an override decoding encoding label
pub const ENV_SOURCE_ENCODING: &str = "FACILITY_CSV_ENCODING";

/// Environment variable naming an override output location
pub const ENV_OUTPUT_PATH: &str = "FACILITY_OUTPUT";

/// Default output location for normalized records
pub const DEFAULT_OUTPUT_PATH: &str = "facilities.json";

/// HTTP timeout per source attempt, seconds
pub const FETCH_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Decoding
// =============================================================================

/// Encoding labels tried in order after any transport-declared encoding.
/// The dataset has shipped as both UTF-8 and Shift_JIS across revisions.
pub const FALLBACK_ENCODINGS: &[&str] = &["utf-8", "shift_jis"];

// =============================================================================
// Value Cleaning
// =============================================================================

/// Values meaning "no data" in the source locale. Dash variants cover the
/// half-width hyphen, long vowel mark, minus sign, horizontal bars, and the
/// half-width katakana prolonged sound mark seen across dataset revisions.
pub const NULL_SENTINELS: &[&str] = &[
    "-", "ー", "−", "―", "‐", "ｰ", "なし", "無し", "無", "null", "NULL",
];

/// Region-level name used when a row carries no municipality name
pub const DEFAULT_MUNICIPALITY: &str = "長岡市";

// =============================================================================
// Header Label Candidates
// =============================================================================

/// Candidate column labels per semantic field, most current spelling first.
/// Each label is run through the header normalizer before lookup, so
/// full-width and spaced variants resolve to the same key.
pub mod labels {
    pub const IDENTIFIER: &[&str] = &["施設番号", "番号", "NO", "ID"];
    pub const MUNICIPALITY_CODE: &[&str] =
        &["全国地方公共団体コード", "市区町村コード", "団体コード"];
    pub const MUNICIPALITY_NAME: &[&str] = &["市区町村名", "市町村名", "自治体名"];
    pub const NAME: &[&str] = &["名称", "施設名称", "施設名"];
    pub const ADDRESS: &[&str] = &["住所", "所在地", "設置場所"];
    pub const LATITUDE: &[&str] = &["緯度", "Y座標", "lat"];
    pub const LONGITUDE: &[&str] = &["経度", "X座標", "lon", "lng"];
    pub const CAPACITY: &[&str] = &["収容人数", "定員", "利用定員"];
    pub const NOTES: &[&str] = &["備考", "注意事項", "特記事項"];
    pub const MANAGER: &[&str] = &["管理者", "運営者", "設置主体"];
    pub const EMAIL: &[&str] = &["メールアドレス", "Email", "E-mail"];
    pub const PHONE: &[&str] = &["電話番号", "連絡先電話番号", "TEL"];
    pub const URL: &[&str] = &["URL", "ホームページ", "サイト"];
    pub const DESIGNATED_ON: &[&str] = &["指定年月日", "開設年月日", "設置年月日"];
    pub const FACILITY_TYPE: &[&str] = &["施設分類", "施設種別", "種別"];
    pub const OWNERSHIP: &[&str] = &["公立民立", "公民区分", "設置区分"];
}

/// Substrings qualifying a weekday column as the opening-time column
pub const OPEN_MARKERS: &[&str] = &["開始", "start"];

/// Substrings qualifying a weekday column as the closing-time column
pub const CLOSE_MARKERS: &[&str] = &["終了", "閉館", "end"];

// =============================================================================
// Geospatial
// =============================================================================

/// Mean Earth radius in meters, used by the haversine formula
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Pedestrian travel speed, meters per second
pub const WALKING_SPEED_MPS: f64 = 1.2;

/// Vehicular travel speed, meters per second (~30 km/h urban driving)
pub const DRIVING_SPEED_MPS: f64 = 8.3;

/// Placeholder rendered for absent or non-finite distance/duration values
pub const VALUE_PLACEHOLDER: &str = "-";

/// Base URL of the OSRM-compatible routing service
pub const ROUTING_BASE_URL: &str = "https://router.project-osrm.org";
