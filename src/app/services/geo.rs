//! Geospatial queries over the facility collection
//!
//! Great-circle distance via the haversine formula, linear nearest-facility
//! search, straight-line travel-time estimation, and human-readable
//! formatting. Formatting never panics: absent or non-finite inputs render
//! as a fixed placeholder.

use crate::app::models::{Facility, GeoPoint, TravelMode};
use crate::constants::{EARTH_RADIUS_M, VALUE_PLACEHOLDER};

/// Nearest-facility search result
#[derive(Debug, Clone, Copy)]
pub struct Nearest<'a> {
    pub facility: &'a Facility,
    /// Great-circle distance to the query point, whole meters
    pub distance_m: u32,
}

/// Great-circle distance between two points in whole meters.
///
/// Haversine formula over a mean Earth radius of 6,371,000 m, rounded to the
/// nearest meter. Symmetric, and zero for identical points.
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> u32 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    (EARTH_RADIUS_M * c).round() as u32
}

/// Find the facility nearest to a query point.
///
/// Linear scan; on a tie the first facility in iteration order wins. Returns
/// `None` for an empty collection.
pub fn nearest(facilities: &[Facility], point: GeoPoint) -> Option<Nearest<'_>> {
    let mut best: Option<Nearest<'_>> = None;

    for facility in facilities {
        let d = distance_m(facility.location(), point);
        match &best {
            Some(current) if current.distance_m <= d => {}
            _ => {
                best = Some(Nearest {
                    facility,
                    distance_m: d,
                });
            }
        }
    }

    best
}

/// Straight-line travel time in seconds for a distance and mode.
///
/// Purely informational; a routing-service answer supersedes this estimate
/// whenever one is available.
pub fn estimate_duration_s(meters: f64, mode: TravelMode) -> f64 {
    meters / mode.speed_mps()
}

/// Render a distance: whole meters below 1 km, kilometers to one decimal
/// below 10 km, whole kilometers (grouped) above.
pub fn format_distance(meters: Option<f64>) -> String {
    let Some(m) = meters.filter(|m| m.is_finite()) else {
        return VALUE_PLACEHOLDER.to_string();
    };

    if m < 1000.0 {
        format!("{}m", m.round() as i64)
    } else if m < 10_000.0 {
        format!("{:.1}km", m / 1000.0)
    } else {
        format!("{}km", group_thousands((m / 1000.0).round() as i64))
    }
}

/// Render a duration: whole minutes below an hour, hours and minutes above
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(s) = seconds.filter(|s| s.is_finite()) else {
        return VALUE_PLACEHOLDER.to_string();
    };

    let minutes = (s / 60.0).round() as i64;
    if minutes < 60 {
        format!("{minutes}分")
    } else {
        format!("{}時間{}分", minutes / 60, minutes % 60)
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
