//! Command-line argument definitions for the facility processor

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app::models::TravelMode;

/// CLI arguments for the facility processor
///
/// Ingests a municipal public-facility open-data CSV into canonical
/// geolocated records and answers nearest-facility queries against them.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "facility-processor",
    version,
    about = "Normalize municipal facility open data and query it by location",
    long_about = "Fetches a municipal public-facility CSV from prioritized sources, resolves its \
                  historically inconsistent column schema into typed geolocated records, and \
                  supports distance and nearest-facility queries over the result."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Fetch, normalize, and write the facility dataset (main command)
    Process(ProcessArgs),
    /// Find the facility nearest to a point
    Nearest(NearestArgs),
}

/// Arguments shared by every command that ingests the dataset
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Override source location, tried before the production dataset
    ///
    /// Falls back to the FACILITY_CSV_URL environment variable when unset.
    #[arg(long = "source", value_name = "URL")]
    pub source: Option<String>,

    /// Override decoding encoding label (e.g. shift_jis)
    ///
    /// Falls back to the FACILITY_CSV_ENCODING environment variable when unset.
    #[arg(long = "encoding", value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Output path for normalized records
    ///
    /// Falls back to the FACILITY_OUTPUT environment variable, then to
    /// facilities.json in the working directory.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the nearest command
#[derive(Debug, Clone, Parser)]
pub struct NearestArgs {
    /// Query point latitude in decimal degrees
    #[arg(long = "lat", value_name = "DEGREES", allow_hyphen_values = true)]
    pub lat: f64,

    /// Query point longitude in decimal degrees
    #[arg(long = "lon", value_name = "DEGREES", allow_hyphen_values = true)]
    pub lon: f64,

    /// Travel mode for the duration estimate
    #[arg(long = "mode", value_enum, default_value = "walking")]
    pub mode: TravelMode,

    /// Consult the routing service for a real route
    ///
    /// Falls back to straight-line distance and estimated duration when the
    /// service has no route or is unreachable.
    #[arg(long = "route")]
    pub route: bool,

    #[command(flatten)]
    pub ingest: ProcessArgs,
}
