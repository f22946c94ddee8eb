//! Output module for run summaries and reports
//!
//! This module handles:
//! - Printing end-of-run statistics to the terminal
//! - Writing an optional markdown report of the run

mod markdown;
pub mod stats;
mod traits;

pub use markdown::{format_markdown_report, generate_markdown_report};
pub use stats::{format_statistics, print_statistics};
pub use traits::{ChapterFailure, OutputError, OutputResult, RunSummary};
