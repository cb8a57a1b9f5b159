//! Unit tests for the facility CSV ingestion pipeline

pub mod mapping_tests;
