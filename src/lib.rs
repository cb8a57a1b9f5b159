//! Facility Processor Library
//!
//! A Rust library for turning municipal public-facility open-data CSV into a
//! canonical collection of geolocated, typed facility records.
//!
//! This library provides tools for:
//! - Fetching the dataset from prioritized sources with encoding detection
//! - Normalizing historically inconsistent CSV headers into a fixed schema
//! - Cleaning locale-specific null sentinels and coercing typed fields
//! - Great-circle distance and nearest-facility queries
//! - Consuming an OSRM-compatible routing service with graceful fallback

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod facility_csv;
        pub mod fetcher;
        pub mod geo;
        pub mod routing;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DailyWindow, Facility, GeoPoint, TravelMode, Weekday};
pub use config::Config;

/// Result type alias for the facility processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for facility processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Every candidate dataset source failed
    #[error("all dataset sources failed: {}", format_attempts(.attempts))]
    AllSourcesFailed { attempts: Vec<(String, String)> },

    /// Ingestion produced zero usable records
    #[error("dataset contained no usable facility records")]
    EmptyDataset,

    /// CSV-level parsing error (reader setup, header row)
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Routing service failed or returned no usable response
    #[error("routing service unavailable: {reason}")]
    RouteUnavailable { reason: String },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Operation cancelled or interrupted
    #[error("processing interrupted: {reason}")]
    Interrupted { reason: String },
}

fn format_attempts(attempts: &[(String, String)]) -> String {
    attempts
        .iter()
        .map(|(source, reason)| format!("{source}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a routing unavailability error
    pub fn route_unavailable(reason: impl Into<String>) -> Self {
        Self::RouteUnavailable {
            reason: reason.into(),
        }
    }

    /// Create an interruption error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}
