//! Core facility CSV parser implementation
//!
//! Orchestrates header analysis and the per-row assembly loop over decoded
//! CSV text. Row-level failures are contained: a malformed or incomplete row
//! is counted and skipped, never surfaced as an error.

use tracing::{debug, info};

use super::column_mapping::ColumnMapping;
use super::record_parser::parse_facility_record;
use super::stats::{ParseResult, ParseStats};
use crate::{Error, Result};

/// Parser for municipal facility open-data CSV
#[derive(Debug, Default)]
pub struct FacilityCsvParser;

impl FacilityCsvParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse decoded CSV text into canonical facility records.
    ///
    /// Records come back in source row order; the order carries no meaning
    /// beyond iteration. Only a reader-level failure on the header row is an
    /// error.
    pub fn parse_text(&self, text: &str) -> Result<ParseResult> {
        let mut stats = ParseStats::new();
        let mut facilities = Vec::new();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| Error::csv_parsing("failed to read CSV header row", Some(e)))?;
        let mapping = ColumnMapping::analyze(headers);
        debug!(columns = mapping.len(), "analyzed header row");

        for result in reader.records() {
            stats.total_rows += 1;

            match result {
                Ok(record) => match parse_facility_record(&record, &mapping) {
                    Some(facility) => {
                        facilities.push(facility);
                        stats.facilities_parsed += 1;
                    }
                    None => {
                        stats.rows_dropped += 1;
                    }
                },
                Err(e) => {
                    stats.rows_dropped += 1;
                    debug!(row = stats.total_rows, error = %e, "skipped malformed CSV row");
                }
            }
        }

        info!(
            parsed = stats.facilities_parsed,
            dropped = stats.rows_dropped,
            total = stats.total_rows,
            "parsed facility dataset"
        );

        Ok(ParseResult { facilities, stats })
    }
}
