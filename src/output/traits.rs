//! Output types
//!
//! This module defines the run summary written at the end of a run and the
//! errors that writing it can produce.

use crate::crawler::RunReport;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A failed chapter and its cause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterFailure {
    pub chapter: u32,
    pub reason: String,
}

/// Summary of a finished run, ready for rendering
#[derive(Debug, Clone)]
pub struct RunSummary {
    // Run metadata
    pub listing: PathBuf,
    pub output_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config_hash: Option<String>,
    pub range: (u32, u32),
    pub max_parallel: usize,
    pub elapsed_seconds: f64,

    // Counters
    pub processed: u64,
    pub skipped: u64,
    pub errored: u64,
    pub links_written: usize,

    // Details
    pub failures: Vec<ChapterFailure>,
    pub not_found: Vec<u32>,
}

impl RunSummary {
    /// Builds a summary from a run report
    pub fn from_report(
        report: &RunReport,
        listing: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let links_written = report
            .outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_processed())
            .filter_map(|(_, outcome)| outcome.link_count())
            .sum();

        Self {
            listing: listing.into(),
            output_dir: output_dir.into(),
            started_at,
            finished_at,
            config_hash: None,
            range: report.range,
            max_parallel: report.max_parallel,
            elapsed_seconds: report.elapsed.as_secs_f64(),
            processed: report.statistics.processed,
            skipped: report.statistics.skipped,
            errored: report.statistics.errored,
            links_written,
            failures: report
                .failures()
                .map(|(chapter, reason)| ChapterFailure {
                    chapter,
                    reason: reason.to_string(),
                })
                .collect(),
            not_found: report.not_found.clone(),
        }
    }

    pub fn with_config_hash(mut self, hash: Option<String>) -> Self {
        self.config_hash = hash;
        self
    }

    /// Chapters that reached an outcome
    pub fn total_chapters(&self) -> u64 {
        self.processed + self.skipped + self.errored
    }

    /// Average seconds per processed chapter
    ///
    /// `None` when nothing was processed.
    pub fn average_seconds_per_chapter(&self) -> Option<f64> {
        if self.processed > 0 {
            Some(self.elapsed_seconds / self.processed as f64)
        } else {
            None
        }
    }

    /// Calculates the error rate as a percentage of chapters with an outcome
    pub fn error_rate(&self) -> f64 {
        let total = self.total_chapters();
        if total == 0 {
            0.0
        } else {
            (self.errored as f64 / total as f64) * 100.0
        }
    }
}
