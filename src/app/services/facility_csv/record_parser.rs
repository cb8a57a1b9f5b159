//! Per-row facility assembly
//!
//! Builds one canonical record from a parsed CSV row. Rows missing any
//! mandatory field (identifier, name, latitude, longitude) are dropped
//! silently; a drop is not an error and does not abort the batch.

use csv::StringRecord;
use tracing::debug;

use super::column_mapping::ColumnMapping;
use super::field_parsers::{clean_value, parse_capacity, parse_date, parse_number, parse_time};
use crate::app::models::{DailyWindow, Facility, Weekday};
use crate::constants::{DEFAULT_MUNICIPALITY, labels};

/// Assemble a facility from one row, or `None` when the row must be dropped
pub fn parse_facility_record(record: &StringRecord, mapping: &ColumnMapping) -> Option<Facility> {
    let resolve = |candidates: &[&str]| -> Option<String> {
        mapping
            .resolve(candidates)
            .and_then(|index| record.get(index))
            .and_then(clean_value)
    };

    let Some(id) = resolve(labels::IDENTIFIER) else {
        debug!("row dropped: identifier absent");
        return None;
    };
    let Some(name) = resolve(labels::NAME) else {
        debug!(%id, "row dropped: display name absent");
        return None;
    };
    let Some(lat) = resolve(labels::LATITUDE).and_then(|v| parse_number(&v)) else {
        debug!(%id, "row dropped: latitude absent or not numeric");
        return None;
    };
    let Some(lon) = resolve(labels::LONGITUDE).and_then(|v| parse_number(&v)) else {
        debug!(%id, "row dropped: longitude absent or not numeric");
        return None;
    };

    let windows = Weekday::ALL.map(|weekday| {
        let (open_index, close_index) = mapping.weekday_columns(weekday);
        let opens = open_index
            .and_then(|index| record.get(index))
            .and_then(clean_value)
            .and_then(|v| parse_time(&v));
        let closes = close_index
            .and_then(|index| record.get(index))
            .and_then(clean_value)
            .and_then(|v| parse_time(&v));
        DailyWindow::new(weekday, opens, closes)
    });

    Some(Facility {
        id,
        municipality_code: resolve(labels::MUNICIPALITY_CODE),
        municipality: resolve(labels::MUNICIPALITY_NAME)
            .unwrap_or_else(|| DEFAULT_MUNICIPALITY.to_string()),
        name,
        address: resolve(labels::ADDRESS).unwrap_or_default(),
        lat,
        lon,
        windows,
        notes: resolve(labels::NOTES),
        capacity: resolve(labels::CAPACITY).and_then(|v| parse_capacity(&v)),
        manager: resolve(labels::MANAGER),
        email: resolve(labels::EMAIL),
        phone: resolve(labels::PHONE),
        url: resolve(labels::URL),
        designated_on: resolve(labels::DESIGNATED_ON).and_then(|v| parse_date(&v)),
        facility_type: resolve(labels::FACILITY_TYPE),
        ownership: resolve(labels::OWNERSHIP),
    })
}
