//! Configuration for dataset ingestion.
//!
//! Environment-style overrides are read once at the process edge and carried
//! in an immutable struct; pipeline code never performs ambient lookups.

use crate::constants::{DEFAULT_OUTPUT_PATH, ENV_OUTPUT_PATH, ENV_SOURCE_ENCODING, ENV_SOURCE_URL};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Override source location, tried before the production dataset
    pub source_override: Option<String>,

    /// Override decoding encoding label, tried before the fallback list
    pub encoding_override: Option<String>,

    /// Output location for normalized records
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_override: None,
            encoding_override: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl Config {
    /// Build configuration from environment variables.
    ///
    /// An unset or blank variable falls back to the default; values are
    /// trimmed so accidental whitespace never becomes a source location.
    pub fn from_env() -> Self {
        Self {
            source_override: env_nonblank(ENV_SOURCE_URL),
            encoding_override: env_nonblank(ENV_SOURCE_ENCODING),
            output_path: env_nonblank(ENV_OUTPUT_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
        }
    }

    /// Validate explicitly constructed configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.source_override
            && url.trim().is_empty()
        {
            return Err(Error::configuration("source override must not be blank"));
        }
        if let Some(label) = &self.encoding_override
            && encoding_rs::Encoding::for_label(label.trim().as_bytes()).is_none()
        {
            return Err(Error::configuration(format!(
                "unknown encoding label: {label}"
            )));
        }
        Ok(())
    }
}

fn env_nonblank(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
