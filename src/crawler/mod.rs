//! Crawler module for chapter fetching and processing
//!
//! This module contains the core pipeline, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - Resource link extraction from chapter markup
//! - Per-chapter resume decisions and persistence
//! - Bounded-parallel scheduling over a chapter range

mod extractor;
mod fetcher;
mod processor;
mod scheduler;

pub use crate::config::AdmissionPolicy;
pub use extractor::{ExtractedLinkSet, ExtractionRule, LinkExtractor};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use processor::ChapterProcessor;
pub use scheduler::{default_parallelism, RunReport, Scheduler, FALLBACK_PARALLELISM};

use crate::config::{validate, Config};
use crate::index::LinkIndex;
use crate::storage::DirectoryStore;
use crate::ChapterError;
use std::path::Path;
use std::sync::Arc;

/// Checks a requested chapter range
///
/// Both bounds must be at least 1 and `start` must not exceed `end`.
pub fn validate_range(start: u32, end: u32) -> Result<(), ChapterError> {
    let reason = if start < 1 || end < 1 {
        "chapter numbers must be positive"
    } else if start > end {
        "start chapter cannot be greater than end chapter"
    } else {
        return Ok(());
    };

    Err(ChapterError::InvalidRange {
        start,
        end,
        reason: reason.to_string(),
    })
}

/// Runs a complete harvest for a listing
///
/// This is the main entry point. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP fetcher and the extractor from configuration
/// 3. Create the output directory
/// 4. Process chapters `start..=end` found in `index`
///
/// # Arguments
///
/// * `config` - The tool configuration
/// * `index` - The loaded chapter listing
/// * `output_dir` - Directory receiving one `chapter-<n>` subdirectory per chapter
/// * `start`, `end` - Inclusive chapter range
///
/// # Returns
///
/// * `Ok(RunReport)` - All chapters reached an outcome (individual failures included)
/// * `Err(ChapterError)` - Setup failed before any chapter was dispatched
pub async fn harvest(
    config: &Config,
    index: &LinkIndex,
    output_dir: &Path,
    start: u32,
    end: u32,
) -> Result<RunReport, ChapterError> {
    validate(config)?;

    let fetcher = Arc::new(HttpFetcher::new(&config.fetch)?);
    let extractor = LinkExtractor::new(&ExtractionRule::from(&config.extract))?;

    let store = DirectoryStore::new(output_dir, config.output.links_file.clone());
    store.ensure_root()?;
    tracing::info!("Writing chapter output under {}", store.root().display());

    let max_parallel = match config.scheduler.max_parallel {
        0 => default_parallelism(config.scheduler.parallel_cap),
        n => n,
    };

    let processor = ChapterProcessor::new(fetcher, extractor, Arc::new(store));
    let scheduler = Scheduler::new(Arc::new(processor), max_parallel)
        .with_admission(config.scheduler.admission);

    Ok(scheduler.run(start, end, index).await)
}
