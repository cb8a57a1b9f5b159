//! Client for the external turn-by-turn routing service
//!
//! Consumes an OSRM-compatible HTTP API. Absence of a route is a normal,
//! non-fatal outcome (`Ok(None)`); transport failures surface as
//! [`Error::RouteUnavailable`], which callers recover from by falling back to
//! straight-line distance and estimated duration.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::app::models::{GeoPoint, TravelMode};
use crate::constants::{FETCH_TIMEOUT_SECS, ROUTING_BASE_URL};
use crate::{Error, Result};

/// A routed path between two points
#[derive(Debug, Clone)]
pub struct Route {
    /// Polyline of coordinate pairs along the route
    pub geometry: Vec<GeoPoint>,
    /// Total route distance in meters
    pub distance_m: f64,
    /// Total route duration in seconds
    pub duration_s: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: longitude first
    coordinates: Vec<[f64; 2]>,
}

/// Routing service client
#[derive(Debug)]
pub struct RoutingClient {
    client: Client,
    base_url: String,
}

impl RoutingClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(ROUTING_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Query a route between two points for a travel mode.
    ///
    /// The cancellation token makes superseded queries drop out before
    /// committing a result, so a stale response can never overwrite newer
    /// state.
    pub async fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        mode: TravelMode,
        cancel: &CancellationToken,
    ) -> Result<Option<Route>> {
        let url = format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.base_url,
            mode.routing_profile(),
            origin.lon,
            origin.lat,
            destination.lon,
            destination.lat,
        );
        debug!(%url, "querying routing service");

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(Error::interrupted("routing query superseded")),
            result = self.client.get(&url).send() => {
                result
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| Error::route_unavailable(e.to_string()))?
            }
        };

        let payload: OsrmResponse = tokio::select! {
            _ = cancel.cancelled() => return Err(Error::interrupted("routing query superseded")),
            result = response.json() => {
                result.map_err(|e| Error::route_unavailable(format!("invalid response: {e}")))?
            }
        };

        if payload.code != "Ok" {
            debug!(code = %payload.code, "routing service returned no route");
            return Ok(None);
        }

        Ok(payload.routes.into_iter().next().map(|route| Route {
            geometry: route
                .geometry
                .coordinates
                .iter()
                .map(|[lon, lat]| GeoPoint::new(*lat, *lon))
                .collect(),
            distance_m: route.distance,
            duration_s: route.duration,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osrm_response_deserializes_geojson_order() {
        let payload = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 1234.5,
                "duration": 987.6,
                "geometry": {"coordinates": [[138.85, 37.44], [138.86, 37.45]]}
            }]
        }"#;

        let parsed: OsrmResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.code, "Ok");
        let route = &parsed.routes[0];
        assert!((route.distance - 1234.5).abs() < 1e-9);
        // longitude first in the wire format
        assert!((route.geometry.coordinates[0][0] - 138.85).abs() < 1e-9);
    }

    #[test]
    fn no_route_code_deserializes_without_routes() {
        let payload = r#"{"code": "NoRoute"}"#;
        let parsed: OsrmResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.code, "NoRoute");
        assert!(parsed.routes.is_empty());
    }
}
