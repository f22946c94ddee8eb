//! Chapter marker recognition

use regex::Regex;
use std::sync::OnceLock;

/// Prefix that opens a chapter entry
pub const CHAPTER_MARKER: &str = "# Chapter";

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"# Chapter (\d+)").expect("chapter marker pattern is valid"))
}

/// Extracts the chapter number from a marker line
///
/// Returns `None` when the line carries no `# Chapter <digits>` group or the
/// number does not fit a `u32`.
///
/// # Example
///
/// ```
/// use chapter_links::index::parse_chapter_marker;
///
/// assert_eq!(parse_chapter_marker("# Chapter 12"), Some(12));
/// assert_eq!(parse_chapter_marker("# Chapter twelve"), None);
/// ```
pub fn parse_chapter_marker(line: &str) -> Option<u32> {
    let captures = marker_regex().captures(line)?;
    captures.get(1)?.as_str().parse().ok()
}
