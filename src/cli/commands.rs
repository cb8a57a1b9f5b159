//! Command implementations for the facility processor CLI

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::app::models::{GeoPoint, TravelMode};
use crate::app::services::facility_csv::FacilityCsvParser;
use crate::app::services::fetcher::DatasetFetcher;
use crate::app::services::geo;
use crate::app::services::routing::RoutingClient;
use crate::cli::args::{Args, Commands, NearestArgs, ProcessArgs};
use crate::config::Config;
use crate::{Error, Facility, Result};

/// Main command runner
pub async fn run(args: Args, cancel: CancellationToken) -> Result<()> {
    setup_logging(args.verbose);

    match args.command {
        Some(Commands::Process(process_args)) => process(process_args, cancel).await,
        Some(Commands::Nearest(nearest_args)) => nearest(nearest_args, cancel).await,
        None => Ok(()),
    }
}

/// Initialize tracing with an env-filter; -v raises the default level
fn setup_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Merge environment configuration with CLI overrides
fn build_config(args: &ProcessArgs) -> Result<Config> {
    let mut config = Config::from_env();
    if let Some(source) = &args.source {
        config.source_override = Some(source.clone());
    }
    if let Some(encoding) = &args.encoding {
        config.encoding_override = Some(encoding.clone());
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Fetch and normalize the dataset, failing on an empty result
async fn ingest(config: &Config, cancel: &CancellationToken) -> Result<Vec<Facility>> {
    let fetcher = DatasetFetcher::new(config)?;
    let fetched = fetcher.fetch(cancel).await?;

    let result = FacilityCsvParser::new().parse_text(&fetched.text)?;
    if result.facilities.is_empty() {
        return Err(Error::EmptyDataset);
    }

    info!(
        source = %fetched.source,
        records = result.facilities.len(),
        dropped = result.stats.rows_dropped,
        "ingestion complete"
    );
    Ok(result.facilities)
}

async fn process(args: ProcessArgs, cancel: CancellationToken) -> Result<()> {
    let config = build_config(&args)?;
    let facilities = ingest(&config, &cancel).await?;

    let json = serde_json::to_string_pretty(&facilities)
        .map_err(|e| Error::configuration(format!("failed to serialize records: {e}")))?;
    tokio::fs::write(&config.output_path, json).await?;

    println!(
        "Wrote {} facility records to {}",
        facilities.len(),
        config.output_path.display()
    );
    Ok(())
}

async fn nearest(args: NearestArgs, cancel: CancellationToken) -> Result<()> {
    let config = build_config(&args.ingest)?;
    let facilities = ingest(&config, &cancel).await?;

    let query = GeoPoint::new(args.lat, args.lon);
    let Some(hit) = geo::nearest(&facilities, query) else {
        return Err(Error::EmptyDataset);
    };

    let straight_line = hit.distance_m as f64;
    let (distance, duration) = if args.route {
        match route_or_fallback(query, hit.facility.location(), args.mode, &cancel).await {
            Some((d, s)) => (d, s),
            None => (
                straight_line,
                geo::estimate_duration_s(straight_line, args.mode),
            ),
        }
    } else {
        (
            straight_line,
            geo::estimate_duration_s(straight_line, args.mode),
        )
    };

    println!("{}", hit.facility.name);
    if !hit.facility.address.is_empty() {
        println!("  住所: {}", hit.facility.address);
    }
    println!("  距離: {}", geo::format_distance(Some(distance)));
    println!("  所要時間: {}", geo::format_duration(Some(duration)));
    for window in &hit.facility.windows {
        if !window.is_unknown() {
            println!("  {}: {}", window.weekday.native_label(), window.display());
        }
    }
    Ok(())
}

/// Ask the routing service; `None` means fall back to straight-line figures
async fn route_or_fallback(
    origin: GeoPoint,
    destination: GeoPoint,
    mode: TravelMode,
    cancel: &CancellationToken,
) -> Option<(f64, f64)> {
    let client = match RoutingClient::new() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "routing client unavailable");
            return None;
        }
    };

    match client.route(origin, destination, mode, cancel).await {
        Ok(Some(route)) => Some((route.distance_m, route.duration_s)),
        Ok(None) => {
            info!("routing service found no route; using straight-line figures");
            None
        }
        Err(e) => {
            warn!(error = %e, "routing query failed; using straight-line figures");
            None
        }
    }
}
