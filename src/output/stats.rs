//! End-of-run statistics display
//!
//! Renders the counters of a `RunReport` for the terminal.

use crate::crawler::RunReport;
use std::path::Path;

const LABEL_WIDTH: usize = 20;

/// Formats the final statistics block
///
/// The average line only appears when at least one chapter was processed.
pub fn format_statistics(report: &RunReport, output_dir: &Path) -> String {
    let stats = &report.statistics;
    let seconds = report.elapsed.as_secs_f64();

    let mut out = String::new();
    out.push_str("=== Processing Complete ===\n\n");

    let mut line = |label: &str, value: String, unit: &str| {
        out.push_str(&format!(
            "  * {:<width$} {} {}\n",
            label,
            value,
            unit,
            width = LABEL_WIDTH
        ));
    };

    line("Processed", stats.processed.to_string(), "chapters");
    line("Skipped", stats.skipped.to_string(), "chapters");
    line("Errors", stats.errored.to_string(), "chapters");
    line("Total time", format!("{:.3}", seconds), "seconds");

    if stats.processed > 0 {
        let average = seconds / stats.processed as f64;
        line("Avg per chapter", format!("{:.3}", average), "sec/chapter");
    }

    if !report.not_found.is_empty() {
        line(
            "Not in listing",
            report.not_found.len().to_string(),
            "chapters",
        );
    }

    out.push('\n');
    out.push_str(&format!("Results saved in: {}\n", output_dir.display()));
    out
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(report: &RunReport, output_dir: &Path) {
    println!();
    print!("{}", format_statistics(report, output_dir));
}
