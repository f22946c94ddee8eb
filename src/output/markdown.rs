//! Markdown run report
//!
//! This module renders a finished run as a human-readable markdown document,
//! including counters, failed chapters and chapters missing from the listing.

use crate::output::traits::{OutputError, OutputResult, RunSummary};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report for a finished run
///
/// # Arguments
///
/// * `summary` - The run summary
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn generate_markdown_report(summary: &RunSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(summary);

    let write_err = |source| OutputError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    let mut file = File::create(output_path).map_err(write_err)?;
    file.write_all(markdown.as_bytes()).map_err(write_err)?;

    Ok(())
}

/// Formats a run summary as markdown
pub fn format_markdown_report(summary: &RunSummary) -> String {
    let mut md = String::new();

    md.push_str("# Chapter-Links Run Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Listing**: {}\n", summary.listing.display()));
    md.push_str(&format!(
        "- **Output Directory**: {}\n",
        summary.output_dir.display()
    ));
    md.push_str(&format!(
        "- **Started**: {}\n",
        summary.started_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        summary.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        summary.elapsed_seconds
    ));
    md.push_str(&format!(
        "- **Chapter Range**: {} to {}\n",
        summary.range.0, summary.range.1
    ));
    md.push_str(&format!("- **Parallelism**: {}\n", summary.max_parallel));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Counters
    md.push_str("## Statistics\n\n");
    md.push_str("| Outcome | Chapters |\n");
    md.push_str("|---------|----------|\n");
    md.push_str(&format!("| Processed | {} |\n", summary.processed));
    md.push_str(&format!("| Skipped | {} |\n", summary.skipped));
    md.push_str(&format!("| Errored | {} |\n", summary.errored));
    md.push_str(&format!("| Total | {} |\n\n", summary.total_chapters()));

    md.push_str(&format!(
        "- **Links Written**: {}\n",
        summary.links_written
    ));
    if let Some(average) = summary.average_seconds_per_chapter() {
        md.push_str(&format!(
            "- **Average Time per Processed Chapter**: {:.2} seconds\n",
            average
        ));
    }
    md.push_str(&format!(
        "- **Error Rate**: {:.2}%\n\n",
        summary.error_rate()
    ));

    if !summary.failures.is_empty() {
        md.push_str("## Failed Chapters\n\n");
        md.push_str("| Chapter | Reason |\n");
        md.push_str("|---------|--------|\n");

        for failure in &summary.failures {
            md.push_str(&format!(
                "| {} | {} |\n",
                failure.chapter,
                failure.reason.replace('|', "\\|")
            ));
        }
        md.push('\n');
    }

    if !summary.not_found.is_empty() {
        md.push_str("## Chapters Not In Listing\n\n");
        let chapters: Vec<String> = summary.not_found.iter().map(u32::to_string).collect();
        md.push_str(&chapters.join(", "));
        md.push_str("\n\n");
    }

    md
}
