//! Chapter-Links main entry point
//!
//! This is the command-line interface for the chapter link harvester.

use anyhow::Context;
use chapter_links::config::{load_config_with_hash, Config};
use chapter_links::crawler::{harvest, validate_range};
use chapter_links::index::LinkIndex;
use chapter_links::output::{generate_markdown_report, print_statistics, RunSummary};
use chapter_links::storage::output_dir_for;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Chapter-Links: a resumable chapter image link harvester
///
/// Reads a listing of `# Chapter N` markers each followed by a page URL,
/// fetches chapters START through END, and writes every chapter's image
/// links to `<root-dir>/<listing name>/chapter-N/base.txt`. Chapters whose
/// output already holds the current number of links are skipped.
#[derive(Parser, Debug)]
#[command(name = "chapter-links")]
#[command(version = "1.0.0")]
#[command(about = "Resumable chapter image link harvester", long_about = None)]
struct Cli {
    /// Chapter listing file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// First chapter to process
    #[arg(value_name = "START")]
    start: u32,

    /// Last chapter to process (inclusive)
    #[arg(value_name = "END")]
    end: u32,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of chapters processed concurrently (overrides the config)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    jobs: Option<u16>,

    /// Write a markdown report of the run to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    validate_range(cli.start, cli.end)?;

    if !cli.input.exists() {
        anyhow::bail!("Input file '{}' not found", cli.input.display());
    }

    let (mut config, config_hash) = load_configuration(cli.config.as_deref())?;
    if let Some(jobs) = cli.jobs {
        config.scheduler.max_parallel = usize::from(jobs);
    }

    tracing::info!("Loading chapter links from {}", cli.input.display());
    let index = LinkIndex::load(&cli.input)?;
    tracing::info!("Loaded {} chapter links", index.len());

    let output_dir = output_dir_for(Path::new(&config.output.root_dir), &cli.input);

    let started_at = chrono::Utc::now();
    let report = harvest(&config, &index, &output_dir, cli.start, cli.end)
        .await
        .context("Harvest could not start")?;
    let finished_at = chrono::Utc::now();

    if !cli.quiet {
        print_statistics(&report, &output_dir);
    }

    if let Some(path) = &cli.report {
        let summary = RunSummary::from_report(
            &report,
            &cli.input,
            &output_dir,
            started_at,
            finished_at,
        )
        .with_config_hash(config_hash);

        write_report(&summary, path);
    }

    Ok(())
}

/// Writes the markdown report; a failure is logged and does not fail the run
fn write_report(summary: &RunSummary, path: &Path) -> bool {
    match generate_markdown_report(summary, path) {
        Ok(()) => {
            tracing::info!("Report written to {}", path.display());
            true
        }
        Err(e) => {
            tracing::error!("{}", e);
            false
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("chapter_links=info,warn"),
            1 => EnvFilter::new("chapter_links=debug,info"),
            2 => EnvFilter::new("chapter_links=trace,debug"),
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

/// Loads the configuration file, or the defaults when none is given
fn load_configuration(path: Option<&Path>) -> anyhow::Result<(Config, Option<String>)> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok((Config::default(), None));
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok((config, Some(hash)))
}
