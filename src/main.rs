use clap::Parser;
use facility_processor::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Cancellation token coordinates graceful shutdown; a new run always
        // carries a fresh token, so a superseded query can never commit.
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(facility_processor::Error::interrupted(
                    "processing interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information when no subcommand is provided
fn show_help_and_commands() {
    println!("Facility Processor - Municipal Open Data Normalizer");
    println!("===================================================");
    println!();
    println!("Fetch a municipal public-facility CSV, normalize its inconsistent");
    println!("schema into typed geolocated records, and query them by location.");
    println!();
    println!("USAGE:");
    println!("    facility-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Fetch, normalize, and write the facility dataset");
    println!("    nearest     Find the facility nearest to a point");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Normalize the production dataset to facilities.json:");
    println!("    facility-processor process");
    println!();
    println!("    # Use a local override source with a known encoding:");
    println!("    facility-processor process --source file.csv --encoding shift_jis");
    println!();
    println!("    # Nearest facility to a point, with a routed travel time:");
    println!("    facility-processor nearest --lat 37.4468 --lon 138.8512 --route");
    println!();
    println!("For detailed help on any command, use:");
    println!("    facility-processor <COMMAND> --help");
}
