//! Parsing statistics and result structures

use crate::app::models::Facility;

/// Parsing result with facilities in source row order
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Successfully assembled facility records
    pub facilities: Vec<Facility>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of data rows encountered
    pub total_rows: usize,

    /// Number of facilities successfully assembled
    pub facilities_parsed: usize,

    /// Number of rows dropped for missing mandatory fields or CSV errors
    pub rows_dropped: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of rows that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.facilities_parsed as f64 / self.total_rows as f64) * 100.0
        }
    }
}
