//! CSV ingestion pipeline for municipal facility open data
//!
//! The dataset's column schema has drifted across revisions: labels mix
//! full-width and half-width characters, several historical spellings exist
//! for the same field, and per-weekday time columns embed day and role
//! information directly in the header text. This module resolves that
//! free-form schema into the fixed [`Facility`](crate::Facility) shape while
//! tolerating partial or malformed rows.
//!
//! ## Architecture
//!
//! - [`parser`] - Core parsing orchestration over decoded CSV text
//! - [`header`] - Label normalization into a comparison-stable form
//! - [`column_mapping`] - Semantic field resolution via candidate labels and
//!   weekday/role heuristics
//! - [`field_parsers`] - Value cleaning and typed coercion
//! - [`record_parser`] - Per-row facility assembly
//! - [`stats`] - Parsing statistics and result structures

pub mod column_mapping;
pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::ColumnMapping;
pub use header::normalize_label;
pub use parser::FacilityCsvParser;
pub use stats::{ParseResult, ParseStats};
