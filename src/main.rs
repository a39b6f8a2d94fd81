//! Escrow Dashboard CLI
//!
//! Command-line interface for producing dashboard listings from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv > listing.csv
//! cargo run -- --search alice --status "Funds Locked" transactions.csv
//! cargo run -- --kind dispute --output grouped disputes.csv
//! cargo run -- --strategy async --max-concurrent 4 january.csv february.csv
//! ```
//!
//! The program loads records from the input CSV files, runs them through the
//! dashboard pipeline and writes the report to stdout. Diagnostics go to
//! stderr; set `RUST_LOG` (e.g. `RUST_LOG=info`) to see more of them.
//!
//! # Processing Strategies
//!
//! - **sync**: Sequential loading; an unreadable input aborts the run (default)
//! - **async**: Concurrent loading; unreadable inputs are skipped
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, unreadable input, output failure, etc.)

use escrow_dashboard_engine::cli;
use escrow_dashboard_engine::strategy;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_load_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };
    let report = args.to_report_config();

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.inputs, &report, &mut output) {
        error!(error = %e, "processing failed");
        process::exit(1);
    }
}
