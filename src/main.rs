//! TDSK-Radar main entry point
//!
//! This is the command-line interface for the apartment market snapshot tool.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tdsk_radar::config::{load_config, Config};
use tdsk_radar::output::write_apartments_csv;
use tdsk_radar::report::{active_objects_by_day, load_exposure, write_active_objects_csv};
use tdsk_radar::scrape::scrape_apartments;
use tracing_subscriber::EnvFilter;

/// TDSK-Radar: apartment market snapshot tool
///
/// TDSK-Radar scrapes the developer's paginated apartment search into a
/// listings CSV and derives an active-objects-by-day report from an
/// exposure table.
#[derive(Parser, Debug)]
#[command(name = "tdsk-radar")]
#[command(version = "1.0.0")]
#[command(about = "Apartment market snapshot tool", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would run without fetching anything
    #[arg(long, conflicts_with_all = ["scrape_only", "report_only"])]
    dry_run: bool,

    /// Only crawl the site and write the listings CSV
    #[arg(long, conflicts_with = "report_only")]
    scrape_only: bool,

    /// Only build the exposure report
    #[arg(long)]
    report_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    if !cli.scrape_only {
        handle_report(&config)?;
    }

    if !cli.report_only {
        handle_scrape(&config).await?;
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
            0 => EnvFilter::new("tdsk_radar=info,warn"),
            1 => EnvFilter::new("tdsk_radar=debug,info"),
            2 => EnvFilter::new("tdsk_radar=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the plan
fn handle_dry_run(config: &Config) {
    println!("=== TDSK-Radar Dry Run ===\n");

    println!("Scraper:");
    println!("  Base URL: {}", config.scraper.base_url);
    println!("  Site filter: {}", config.scraper.site_filter);
    println!("  Retry budget: {}", config.scraper.max_request_retries);
    println!("  Request timeout: {}s", config.scraper.request_timeout_secs);

    println!("\nReport:");
    println!("  Exposure table: {}", config.report.exposure_path);
    println!(
        "  Date range: {} to {}",
        config.report.start_date, config.report.end_date
    );

    println!("\nOutput:");
    println!("  Listings: {}", config.output.listings_path);
    println!("  Active by day: {}", config.output.active_by_day_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the exposure report: load, aggregate, write
fn handle_report(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Loading exposure table from {}", config.report.exposure_path);
    let records = load_exposure(Path::new(&config.report.exposure_path))?;
    tracing::info!("Loaded {} exposure records", records.len());

    let rows = active_objects_by_day(&records, config.report.start_date, config.report.end_date)?;
    write_active_objects_csv(Path::new(&config.output.active_by_day_path), &rows)?;
    tracing::info!(
        "Active-objects report written to {} ({} rows)",
        config.output.active_by_day_path,
        rows.len()
    );

    Ok(())
}

/// Handles the crawl: scrape every listed apartment and write the CSV
async fn handle_scrape(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Starting apartment scrape");
    let apartments = scrape_apartments(&config.scraper).await?;
    tracing::info!("Scraped {} apartments", apartments.len());

    write_apartments_csv(Path::new(&config.output.listings_path), &apartments)?;
    tracing::info!("Listings written to {}", config.output.listings_path);

    Ok(())
}
