//! Value cleaning and typed coercion
//!
//! Cell values carry locale-specific null sentinels, unit suffixes ("50人"),
//! and loosely formatted times ("9:30", "9時30分", "９：００"). Cleaning maps
//! sentinels to absence; coercion never stores NaN or infinity and never
//! panics on malformed input.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::NULL_SENTINELS;

/// Characters that survive numeric coercion
static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9+\-.]").expect("valid regex"));

/// One-or-two digit hour, optional colon-like separator, optional two-digit
/// minute, optional native minute suffix
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})(?:[:時](\d{2})?)?分?$").expect("valid regex"));

/// Date formats seen across dataset revisions
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y年%m月%d日"];

/// Clean a raw cell value.
///
/// Returns `None` when the value is empty after trimming (the trim covers the
/// ideographic space U+3000) or matches a null sentinel; otherwise the trimmed
/// value is kept.
pub fn clean_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NULL_SENTINELS.contains(&trimmed) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Coerce a cleaned value to a finite number.
///
/// Every character that is not a digit, sign, or decimal point is stripped
/// before parsing, so unit suffixes and grouping marks are tolerated. An
/// empty remainder or a non-finite parse yields `None`.
pub fn parse_number(value: &str) -> Option<f64> {
    let stripped = NON_NUMERIC.replace_all(value, "");
    if stripped.is_empty() {
        return None;
    }
    stripped.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce a cleaned value to a non-negative capacity.
///
/// Absent stays absent; a negative figure is treated as absent rather than
/// clamped, since zero means "capacity of zero" in this dataset.
pub fn parse_capacity(value: &str) -> Option<u32> {
    let n = parse_number(value)?;
    if n < 0.0 { None } else { Some(n as u32) }
}

/// Coerce a cleaned value to a canonical "HH:MM" time string.
///
/// The hour is zero-padded and a missing minute group defaults to "00".
/// Values outside the pattern yield `None`; nothing here ever panics, so
/// out-of-range figures like "24:99" pass through shaped but unvalidated.
pub fn parse_time(value: &str) -> Option<String> {
    // Values are not header-normalized, so unify full-width digits and
    // colons here before matching.
    let unified: String = value
        .trim()
        .chars()
        .map(|c| match c {
            '：' => ':',
            '０'..='９' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            other => other,
        })
        .collect();

    let caps = TIME_PATTERN.captures(&unified)?;
    let hour = caps.get(1).map(|m| m.as_str())?;
    let minute = caps.get(2).map(|m| m.as_str()).unwrap_or("00");
    Some(format!("{hour:0>2}:{minute}"))
}

/// Coerce a cleaned value to a date, trying each known format
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value.trim(), format).ok())
}
