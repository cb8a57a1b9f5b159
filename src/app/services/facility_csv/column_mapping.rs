//! Semantic field resolution over normalized column headers
//!
//! Scalar fields resolve through priority-ordered candidate label lists;
//! weekday open/close columns resolve through a day-token plus role-marker
//! heuristic, since their exact header text varies across dataset revisions.

use csv::StringRecord;
use std::collections::HashMap;

use super::header::normalize_label;
use crate::app::models::Weekday;
use crate::constants::{CLOSE_MARKERS, OPEN_MARKERS};

/// Column mapping built from a normalized header row
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Normalized column name to index; first occurrence wins on duplicates
    name_to_index: HashMap<String, usize>,

    /// Normalized column names in source column order
    ordered_names: Vec<String>,
}

impl ColumnMapping {
    /// Normalize every header label and build the lookup tables
    pub fn analyze(headers: &StringRecord) -> Self {
        let mut name_to_index = HashMap::new();
        let mut ordered_names = Vec::with_capacity(headers.len());

        for (index, header) in headers.iter().enumerate() {
            let name = normalize_label(header);
            name_to_index.entry(name.clone()).or_insert(index);
            ordered_names.push(name);
        }

        ColumnMapping {
            name_to_index,
            ordered_names,
        }
    }

    /// Resolve a scalar field through an ordered candidate label list.
    ///
    /// Candidates are normalized before lookup; the first present candidate
    /// wins, so more specific or current spellings belong at the front.
    pub fn resolve(&self, candidates: &[&str]) -> Option<usize> {
        candidates
            .iter()
            .find_map(|candidate| self.name_to_index.get(&normalize_label(candidate)).copied())
    }

    /// Resolve the open-time and close-time column for one weekday.
    ///
    /// A column qualifies when it contains a day token for the weekday (the
    /// native character or the Latin abbreviation, matched case-insensitively)
    /// together with an opening marker or a closing marker. The first
    /// qualifying column in source order wins for each role; a weekday with
    /// no matching column yields `None` for that role.
    ///
    /// Holiday-override columns that carry both a day token and a role marker
    /// can shadow the regular column; first-match-wins is the contract.
    pub fn weekday_columns(&self, weekday: Weekday) -> (Option<usize>, Option<usize>) {
        let mut open_index = None;
        let mut close_index = None;

        for (index, name) in self.ordered_names.iter().enumerate() {
            let lower = name.to_lowercase();
            let day_match =
                name.contains(weekday.native_token()) || lower.contains(weekday.latin_token());
            if !day_match {
                continue;
            }

            if open_index.is_none() && contains_marker(name, &lower, OPEN_MARKERS) {
                open_index = Some(index);
            }
            if close_index.is_none() && contains_marker(name, &lower, CLOSE_MARKERS) {
                close_index = Some(index);
            }
            if open_index.is_some() && close_index.is_some() {
                break;
            }
        }

        (open_index, close_index)
    }

    /// Number of columns in the header row
    pub fn len(&self) -> usize {
        self.ordered_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_names.is_empty()
    }
}

fn contains_marker(name: &str, lower: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| {
        if marker.is_ascii() {
            lower.contains(marker)
        } else {
            name.contains(marker)
        }
    })
}
