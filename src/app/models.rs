//! Core data structures for facility processing.
//!
//! Defines the canonical facility record, weekly service windows, geographic
//! points, and travel modes used throughout the library.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{DRIVING_SPEED_MPS, WALKING_SPEED_MPS};

/// A latitude/longitude pair in decimal degrees.
///
/// The geospatial engine assumes both components are finite; range validation
/// happens upstream during record assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Days of the week, Sunday-first as the dataset orders its columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays in dataset column order
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Native single-character day token as it appears in column headers
    pub fn native_token(&self) -> &'static str {
        match self {
            Weekday::Sunday => "日",
            Weekday::Monday => "月",
            Weekday::Tuesday => "火",
            Weekday::Wednesday => "水",
            Weekday::Thursday => "木",
            Weekday::Friday => "金",
            Weekday::Saturday => "土",
        }
    }

    /// Abbreviated Latin day token used by some dataset revisions
    pub fn latin_token(&self) -> &'static str {
        match self {
            Weekday::Sunday => "sun",
            Weekday::Monday => "mon",
            Weekday::Tuesday => "tue",
            Weekday::Wednesday => "wed",
            Weekday::Thursday => "thu",
            Weekday::Friday => "fri",
            Weekday::Saturday => "sat",
        }
    }

    /// Full native label for display
    pub fn native_label(&self) -> &'static str {
        match self {
            Weekday::Sunday => "日曜日",
            Weekday::Monday => "月曜日",
            Weekday::Tuesday => "火曜日",
            Weekday::Wednesday => "水曜日",
            Weekday::Thursday => "木曜日",
            Weekday::Friday => "金曜日",
            Weekday::Saturday => "土曜日",
        }
    }
}

/// Service hours for one weekday.
///
/// Either side may be absent: an open time without a close time (or the
/// reverse) is a valid open-ended window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWindow {
    pub weekday: Weekday,
    /// Opening time, always exactly "HH:MM" when present
    pub opens: Option<String>,
    /// Closing time, always exactly "HH:MM" when present
    pub closes: Option<String>,
}

impl DailyWindow {
    pub fn new(weekday: Weekday, opens: Option<String>, closes: Option<String>) -> Self {
        Self {
            weekday,
            opens,
            closes,
        }
    }

    /// True when neither an open nor a close time is known
    pub fn is_unknown(&self) -> bool {
        self.opens.is_none() && self.closes.is_none()
    }

    /// Render the window, open-ended when one side is absent ("09:00-")
    pub fn display(&self) -> String {
        match (&self.opens, &self.closes) {
            (Some(open), Some(close)) => format!("{open}-{close}"),
            (Some(open), None) => format!("{open}-"),
            (None, Some(close)) => format!("-{close}"),
            (None, None) => "-".to_string(),
        }
    }
}

/// Canonical facility record produced by ingestion.
///
/// Immutable once built: every record has a non-empty identifier, a non-empty
/// display name, finite coordinates, and all seven daily windows in
/// Sunday-first order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub municipality_code: Option<String>,
    pub municipality: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lon: f64,
    pub windows: [DailyWindow; 7],
    pub notes: Option<String>,
    /// Capacity in persons; absent is distinct from zero
    pub capacity: Option<u32>,
    pub manager: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub designated_on: Option<NaiveDate>,
    pub facility_type: Option<String>,
    pub ownership: Option<String>,
}

impl Facility {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// Travel modes supported by duration estimation and the routing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum TravelMode {
    Walking,
    Driving,
}

impl TravelMode {
    /// Fixed straight-line travel speed in meters per second
    pub fn speed_mps(&self) -> f64 {
        match self {
            TravelMode::Walking => WALKING_SPEED_MPS,
            TravelMode::Driving => DRIVING_SPEED_MPS,
        }
    }

    /// Profile selector understood by the routing service
    pub fn routing_profile(&self) -> &'static str {
        match self {
            TravelMode::Walking => "foot",
            TravelMode::Driving => "driving",
        }
    }
}
