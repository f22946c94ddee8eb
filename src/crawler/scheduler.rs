//! Scheduler for driving chapters through a bounded worker pool
//!
//! This module handles:
//! - Walking the requested chapter range in increasing order
//! - Reporting chapters missing from the listing
//! - Global concurrency limiting via a semaphore (or gated batches)
//! - Aggregating outcomes into run statistics

use crate::config::AdmissionPolicy;
use crate::crawler::ChapterProcessor;
use crate::index::LinkIndex;
use crate::state::{ChapterOutcome, RunStatistics, StatsCollector};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Parallelism used when hardware detection reports nothing
pub const FALLBACK_PARALLELISM: usize = 4;

/// Picks the worker count: detected hardware parallelism capped at `cap`
///
/// Falls back to `FALLBACK_PARALLELISM` (still capped) when detection fails.
pub fn default_parallelism(cap: usize) -> usize {
    let detected = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(0);
    resolve_parallelism(detected, cap)
}

fn resolve_parallelism(detected: usize, cap: usize) -> usize {
    let cap = cap.max(1);
    if detected == 0 {
        FALLBACK_PARALLELISM.min(cap)
    } else {
        detected.min(cap)
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Final counters
    pub statistics: RunStatistics,

    /// One outcome per dispatched chapter, in chapter order
    pub outcomes: Vec<(u32, ChapterOutcome)>,

    /// Requested chapters that the listing does not contain
    pub not_found: Vec<u32>,

    /// First and last chapter requested
    pub range: (u32, u32),

    /// Worker cap used for the run
    pub max_parallel: usize,

    /// Wall time of the run
    pub elapsed: Duration,
}

impl RunReport {
    /// Failed chapters with their causes
    pub fn failures(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.outcomes.iter().filter_map(|(chapter, outcome)| match outcome {
            ChapterOutcome::Failed(reason) => Some((*chapter, reason.as_str())),
            _ => None,
        })
    }

    /// Outcome for a single chapter, if it was dispatched
    pub fn outcome(&self, chapter: u32) -> Option<&ChapterOutcome> {
        self.outcomes
            .iter()
            .find(|(c, _)| *c == chapter)
            .map(|(_, outcome)| outcome)
    }
}

/// Drives a `ChapterProcessor` over a chapter range
///
/// At most `max_parallel` chapters are in flight at any time.
pub struct Scheduler {
    processor: Arc<ChapterProcessor>,
    max_parallel: usize,
    admission: AdmissionPolicy,
}

impl Scheduler {
    /// Creates a scheduler with the default (replenishing) admission policy
    ///
    /// A `max_parallel` of 0 is treated as 1.
    pub fn new(processor: Arc<ChapterProcessor>, max_parallel: usize) -> Self {
        Self {
            processor,
            max_parallel: max_parallel.max(1),
            admission: AdmissionPolicy::default(),
        }
    }

    pub fn with_admission(mut self, admission: AdmissionPolicy) -> Self {
        self.admission = admission;
        self
    }

    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Processes chapters `start..=end` that appear in `index`
    ///
    /// Chapters are dispatched in increasing order; completion order is
    /// unordered. Chapters missing from the index are reported and excluded
    /// from the statistics. The returned statistics are final.
    pub async fn run(&self, start: u32, end: u32, index: &LinkIndex) -> RunReport {
        let started = Instant::now();
        let stats = Arc::new(StatsCollector::new());
        let mut not_found = Vec::new();

        tracing::info!(
            "Processing chapters {}-{} with {} workers ({:?} admission)",
            start,
            end,
            self.max_parallel,
            self.admission
        );

        let semaphore = Arc::new(Semaphore::new(self.max_parallel));
        let mut in_flight: Vec<(u32, JoinHandle<ChapterOutcome>)> = Vec::new();
        let mut outcomes = Vec::new();

        for chapter in start..=end {
            let Some(url) = index.get(chapter) else {
                tracing::warn!("Chapter {} not found in input listing", chapter);
                not_found.push(chapter);
                continue;
            };

            // The semaphore is local to this run and never closed
            let permit = match self.admission {
                AdmissionPolicy::Replenish => Arc::clone(&semaphore).acquire_owned().await.ok(),
                AdmissionPolicy::Batched => None,
            };

            let processor = Arc::clone(&self.processor);
            let worker_stats = Arc::clone(&stats);
            let url = url.to_string();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let outcome = processor.process(chapter, &url).await;
                worker_stats.record(&outcome);
                outcome
            });
            in_flight.push((chapter, handle));

            if self.admission == AdmissionPolicy::Batched && in_flight.len() >= self.max_parallel
            {
                drain(&mut in_flight, &stats, &mut outcomes).await;
            }
        }

        drain(&mut in_flight, &stats, &mut outcomes).await;

        let report = RunReport {
            statistics: stats.snapshot(),
            outcomes,
            not_found,
            range: (start, end),
            max_parallel: self.max_parallel,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            "Run finished: {} processed, {} skipped, {} errored in {:.2?}",
            report.statistics.processed,
            report.statistics.skipped,
            report.statistics.errored,
            report.elapsed
        );

        let cache = self.processor.cache();
        if !cache.is_empty() {
            tracing::debug!("{} chapter link counts cached in this process", cache.len());
        }

        report
    }
}

/// Waits for every in-flight chapter
///
/// A task that panicked never recorded its outcome, so it is recorded here as
/// a failure.
async fn drain(
    in_flight: &mut Vec<(u32, JoinHandle<ChapterOutcome>)>,
    stats: &StatsCollector,
    outcomes: &mut Vec<(u32, ChapterOutcome)>,
) {
    for (chapter, handle) in in_flight.drain(..) {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                let outcome = ChapterOutcome::Failed(format!("worker task failed: {}", e));
                tracing::error!("[FAIL] Chapter {:>3} -> {}", chapter, outcome);
                stats.record(&outcome);
                outcome
            }
        };
        outcomes.push((chapter, outcome));
    }
}
