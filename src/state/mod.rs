//! State module for tracking run progress
//!
//! # Components
//!
//! - `ChapterOutcome`: the terminal result of one chapter (processed, skipped, failed)
//! - `RunStatistics` / `StatsCollector`: per-run counters and their shared aggregator
//! - `ExpectedCountCache`: link counts already extracted in this process

mod cache;
mod outcome;
mod statistics;

// Re-export main types
pub use cache::ExpectedCountCache;
pub use outcome::ChapterOutcome;
pub use statistics::{RunStatistics, StatsCollector};
