//! Tsumugi main entry point
//!
//! This is the command-line interface for the Tsumugi tutorial-site
//! harvester. The two pipeline phases are independent runs: `discover`
//! writes the catalog artifact, `extract` consumes it and writes the
//! content batches.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tsumugi::config::load_config;
use tsumugi::fetch::{HttpFetcher, TokioPacer};
use tsumugi::pipeline::{run_discovery, run_extraction};
use tsumugi::sink::FsSink;

/// Tsumugi: a patient tutorial-site harvester
///
/// Tsumugi crawls a tutorial site in two manually-triggered phases:
/// discovery builds a guide/tutorial catalog from the listing pages,
/// extraction fetches every cataloged tutorial and saves its content in
/// batched JSON files. Requests are strictly sequential with fixed
/// pauses in between.
#[derive(Parser, Debug)]
#[command(name = "tsumugi")]
#[command(version = "1.0.0")]
#[command(about = "A patient tutorial-site harvester", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover guides and tutorials, writing the catalog artifact
    Discover {
        /// Path to TOML configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Extract content for every tutorial in an existing catalog
    Extract {
        /// Path to TOML configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Discover { config } => {
            tracing::info!("Loading configuration from: {}", config.display());
            let config = load_config(&config)?;

            let fetcher = HttpFetcher::new(&config.site.user_agent)?;
            let sink = FsSink::new(&config.output.directory)?;
            let report = run_discovery(&config, &fetcher, &TokioPacer, &sink).await?;

            println!(
                "Discovery finished: {} guides, {} tutorials, {} errors",
                report.guides, report.tutorials, report.errors
            );
        }
        Command::Extract { config } => {
            tracing::info!("Loading configuration from: {}", config.display());
            let config = load_config(&config)?;

            let fetcher = HttpFetcher::new(&config.site.user_agent)?;
            let sink = FsSink::new(&config.output.directory)?;
            let report = run_extraction(&config, &fetcher, &TokioPacer, &sink).await?;

            println!(
                "Extraction finished: {} tutorials, {} failures, {} batches",
                report.tutorials, report.failures, report.batches
            );
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tsumugi=info,warn"),
            1 => EnvFilter::new("tsumugi=debug,info"),
            2 => EnvFilter::new("tsumugi=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
