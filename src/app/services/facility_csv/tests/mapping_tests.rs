//! Tests for column mapping and weekday column resolution

use csv::StringRecord;

use super::super::column_mapping::ColumnMapping;
use crate::app::models::Weekday;

fn mapping_from(headers: &[&str]) -> ColumnMapping {
    let record = StringRecord::from(headers.to_vec());
    ColumnMapping::analyze(&record)
}

#[test]
fn test_resolve_through_normalized_labels() {
    // full-width header, half-width candidate
    let mapping = mapping_from(&["ＮＯ", "施設　名称", "緯度"]);

    assert_eq!(mapping.resolve(&["NO"]), Some(0));
    assert_eq!(mapping.resolve(&["施設名称"]), Some(1));
    assert_eq!(mapping.resolve(&["緯度"]), Some(2));
    assert_eq!(mapping.resolve(&["存在しない"]), None);
}

#[test]
fn test_resolve_respects_candidate_priority() {
    let mapping = mapping_from(&["施設名称", "名称"]);

    // candidate order encodes precedence, not column order
    assert_eq!(mapping.resolve(&["名称", "施設名称"]), Some(1));
    assert_eq!(mapping.resolve(&["施設名称", "名称"]), Some(0));
}

#[test]
fn test_resolve_first_occurrence_wins_on_duplicate_headers() {
    let mapping = mapping_from(&["備考", "備考"]);
    assert_eq!(mapping.resolve(&["備考"]), Some(0));
}

#[test]
fn test_weekday_columns_native_markers() {
    let mapping = mapping_from(&[
        "名称",
        "月曜開始時間",
        "月曜終了時間",
        "火曜開始時間",
    ]);

    assert_eq!(mapping.weekday_columns(Weekday::Monday), (Some(1), Some(2)));
    assert_eq!(mapping.weekday_columns(Weekday::Tuesday), (Some(3), None));
    assert_eq!(mapping.weekday_columns(Weekday::Sunday), (None, None));
}

#[test]
fn test_weekday_columns_latin_markers_case_insensitive() {
    let mapping = mapping_from(&["Mon_Start_Time", "Mon_End_Time"]);

    assert_eq!(mapping.weekday_columns(Weekday::Monday), (Some(0), Some(1)));
    assert_eq!(mapping.weekday_columns(Weekday::Friday), (None, None));
}

#[test]
fn test_weekday_columns_parenthesized_day_tokens() {
    let mapping = mapping_from(&["開始時間（日）", "終了時間（日）"]);

    assert_eq!(mapping.weekday_columns(Weekday::Sunday), (Some(0), Some(1)));
}

#[test]
fn test_weekday_columns_first_match_wins() {
    // A holiday-override column carrying the same day token and role marker
    // shadows later columns; first match in column order is the contract.
    let mapping = mapping_from(&["祝日月曜開始時間", "月曜開始時間"]);

    assert_eq!(mapping.weekday_columns(Weekday::Monday), (Some(0), None));
}

#[test]
fn test_day_token_without_role_marker_does_not_match() {
    let mapping = mapping_from(&["月曜利用可否"]);

    assert_eq!(mapping.weekday_columns(Weekday::Monday), (None, None));
}
