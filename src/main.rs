//! fsized - file size distribution and allocation overhead estimator.
//!
//! Usage:
//!   fsized [PATH]              Scan PATH and print the bucket table
//!   fsized -b 8k [PATH]        Model 8 KiB allocation units
//!   fsized -o tab [PATH]       Tab-separated output
//!   fsized -o json [PATH]      JSON output
//!   fsized --help              Show help

use std::convert::Infallible;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use fsized_core::parse_block_size;
use fsized_report::{
    OutputFormat, StatsReport, overhead_summary, render_json, render_simple, render_table,
    scan_summary,
};
use fsized_scan::{JwalkScanner, ProgressTicker, ScanConfig, StatCounter};

#[derive(Parser)]
#[command(
    name = "fsized",
    version,
    about = "File size distribution and allocation-unit overhead estimator",
    long_about = "fsized walks a directory tree, groups files into power-of-two size \
                  buckets and estimates how much space is lost to rounding files up \
                  to whole allocation units."
)]
struct Cli {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Disk block (allocation unit) size in bytes, or in kilobytes with a 'k' suffix (e.g. "8k")
    #[arg(short, long, default_value = "4096", value_parser = parse_block_size)]
    block: u64,

    /// Output format ("formatted" for a pretty-printed table, "json", anything else for tab-separated lines)
    #[arg(short, long, default_value = "formatted", value_parser = parse_output_format)]
    out: OutputFormat,

    /// Count each hardlinked file only once
    #[arg(long)]
    dedup_hardlinks: bool,

    /// Threads for reading directories (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Suppress the periodic progress line
    #[arg(short, long)]
    quiet: bool,
}

fn parse_output_format(s: &str) -> Result<OutputFormat, Infallible> {
    Ok(OutputFormat::from_arg(s))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.quiet);

    let config = ScanConfig::builder()
        .root(cli.path.clone())
        .block_size(cli.block)
        .dedup_hardlinks(cli.dedup_hardlinks)
        .threads(cli.threads)
        .build()
        .context("Invalid configuration")?;

    let mut stats = StatCounter::new(config.block_size);
    let ticker = (!cli.quiet)
        .then(|| ProgressTicker::spawn(stats.count_handle(), Duration::from_secs(1)));

    // Run scan in blocking task (jwalk uses rayon internally)
    let start = Instant::now();
    let (stats, result) = tokio::task::spawn_blocking(move || {
        let result = JwalkScanner::new().scan(&config, &mut stats);
        (stats, result)
    })
    .await
    .context("Scan task failed")?;
    let elapsed = start.elapsed();

    if let Some(ticker) = ticker {
        ticker.stop();
    }

    // Partial statistics are still worth printing after a failed walk.
    match &result {
        Ok(summary) if summary.has_warnings() => {
            tracing::warn!("{} entries could not be read", summary.warnings.len());
        }
        Ok(_) => {}
        Err(err) => {
            tracing::error!("Error while recursively walking {}: {err}", cli.path.display());
        }
    }

    print_report(&stats, cli.out, elapsed)
}

fn print_report(stats: &StatCounter, format: OutputFormat, elapsed: Duration) -> Result<()> {
    let report = StatsReport::from_stats(stats);

    let body = match format {
        OutputFormat::Json => {
            println!("{}", render_json(&report)?);
            return Ok(());
        }
        OutputFormat::Formatted => render_table(&report),
        OutputFormat::Simple => render_simple(&report),
    };

    println!();
    print!("{body}");
    println!();
    println!("{}", scan_summary(stats.total_count(), elapsed));
    println!();
    println!("{}", overhead_summary(&report.estimate));

    Ok(())
}

/// Log to stderr, honoring `RUST_LOG`.
fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
