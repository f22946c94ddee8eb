//! Run statistics shared between chapter workers

use crate::state::ChapterOutcome;
use std::sync::{Mutex, MutexGuard};

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub processed: u64,
    pub skipped: u64,
    pub errored: u64,
}

impl RunStatistics {
    /// Number of chapters that reached a terminal outcome
    pub fn total(&self) -> u64 {
        self.processed + self.skipped + self.errored
    }

    /// Increments exactly one counter for the outcome
    pub fn record(&mut self, outcome: &ChapterOutcome) {
        match outcome {
            ChapterOutcome::Processed(_) => self.processed += 1,
            ChapterOutcome::Skipped(_) => self.skipped += 1,
            ChapterOutcome::Failed(_) => self.errored += 1,
        }
    }
}

/// Thread-safe aggregator handed to every worker
///
/// All updates go through a single mutex; readers take a snapshot.
#[derive(Debug, Default)]
pub struct StatsCollector {
    inner: Mutex<RunStatistics>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes one outcome
    pub fn record(&self, outcome: &ChapterOutcome) {
        self.lock().record(outcome);
    }

    /// Copies the current counters
    pub fn snapshot(&self) -> RunStatistics {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, RunStatistics> {
        // Counters stay consistent even if a holder panicked mid-update
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
