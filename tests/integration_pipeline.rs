//! Integration tests for the full ingestion and query pipeline
//!
//! Exercises the bundled sample dataset end to end: fetch with encoding
//! detection, schema normalization, record assembly, and geospatial queries
//! over the resulting collection.

use std::io::Write;
use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use facility_processor::app::services::facility_csv::FacilityCsvParser;
use facility_processor::app::services::fetcher::{DatasetFetcher, DatasetSource};
use facility_processor::app::services::geo;
use facility_processor::{Facility, GeoPoint, TravelMode, Weekday};

const SAMPLE_PATH: &str = "data/sample_facilities.csv";

async fn ingest_sample() -> Vec<Facility> {
    let fetcher = DatasetFetcher::with_sources(
        vec![DatasetSource::Bundled(PathBuf::from(SAMPLE_PATH))],
        None,
    )
    .unwrap();

    let cancel = CancellationToken::new();
    let fetched = fetcher.fetch(&cancel).await.expect("bundled sample fetch");

    FacilityCsvParser::new()
        .parse_text(&fetched.text)
        .expect("sample parses")
        .facilities
}

#[tokio::test]
async fn sample_dataset_drops_the_row_without_coordinates() {
    let facilities = ingest_sample().await;

    // 5 data rows, one lacks a longitude
    assert_eq!(facilities.len(), 4);
    assert!(facilities.iter().all(|f| f.id != "3"));
    assert!(facilities.iter().all(|f| f.lat.is_finite() && f.lon.is_finite()));
    assert!(facilities.iter().all(|f| !f.id.is_empty() && !f.name.is_empty()));
}

#[tokio::test]
async fn sample_dataset_normalizes_typed_fields() {
    let facilities = ingest_sample().await;

    let central = facilities.iter().find(|f| f.id == "1").unwrap();
    assert_eq!(central.name, "中央子育て支援センター");
    assert_eq!(central.municipality, "長岡市");
    assert_eq!(central.capacity, Some(50));
    assert_eq!(central.windows[1].opens.as_deref(), Some("09:00"));
    assert_eq!(central.windows[6].closes.as_deref(), Some("12:00"));
    // sunday columns hold sentinels in this dataset
    assert!(central.windows[0].is_unknown());

    let north = facilities.iter().find(|f| f.id == "2").unwrap();
    assert_eq!(north.capacity, None, "sentinel capacity must stay absent");
    assert_eq!(north.windows[1].opens.as_deref(), Some("09:30"));
    assert_eq!(north.windows[1].closes.as_deref(), Some("18:00"));

    let beach = facilities.iter().find(|f| f.id == "4").unwrap();
    assert_eq!(beach.capacity, Some(0), "zero capacity is not absent");
    // full-width digits in the time columns
    assert_eq!(beach.windows[0].opens.as_deref(), Some("10:00"));
    assert_eq!(beach.windows[0].weekday, Weekday::Sunday);
}

#[tokio::test]
async fn nearest_facility_query_over_the_sample() {
    let facilities = ingest_sample().await;

    // Nagaoka station front
    let query = GeoPoint::new(37.4481, 138.8514);
    let hit = geo::nearest(&facilities, query).expect("non-empty collection");
    assert_eq!(hit.facility.id, "1");

    let walk_s = geo::estimate_duration_s(hit.distance_m as f64, TravelMode::Walking);
    assert!(walk_s >= 0.0);
    assert_ne!(geo::format_distance(Some(hit.distance_m as f64)), "-");
}

#[tokio::test]
async fn records_round_trip_through_json() {
    let facilities = ingest_sample().await;

    let json = serde_json::to_string(&facilities).unwrap();
    let restored: Vec<Facility> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.len(), facilities.len());
    assert_eq!(restored[0].id, facilities[0].id);
    assert_eq!(restored[0].windows[1], facilities[0].windows[1]);
}

#[tokio::test]
async fn shift_jis_source_decodes_transparently() {
    // Re-encode the bundled sample as Shift_JIS and ingest it through a
    // temporary override source.
    let utf8 = std::fs::read_to_string(SAMPLE_PATH).unwrap();
    let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode(&utf8);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&encoded).unwrap();

    let fetcher = DatasetFetcher::with_sources(
        vec![DatasetSource::Bundled(file.path().to_path_buf())],
        None,
    )
    .unwrap();

    let cancel = CancellationToken::new();
    let fetched = fetcher.fetch(&cancel).await.unwrap();
    let result = FacilityCsvParser::new().parse_text(&fetched.text).unwrap();

    assert_eq!(result.facilities.len(), 4);
    assert_eq!(result.facilities[0].name, "中央子育て支援センター");
}
