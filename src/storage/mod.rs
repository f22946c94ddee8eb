//! Storage module for persisting chapter output
//!
//! This module handles the on-disk resume state:
//! - Writing each chapter's extracted links
//! - Counting previously written links
//! - Deciding whether a chapter is already complete

mod directory;
mod traits;

pub use directory::{count_lines, DirectoryStore};
pub use traits::{ResumeStore, StorageResult};

use std::path::{Path, PathBuf};

/// Output directory for a listing: `<root>/<listing file stem>`
///
/// # Example
///
/// ```
/// use chapter_links::storage::output_dir_for;
/// use std::path::Path;
///
/// let dir = output_dir_for(Path::new("out"), Path::new("lists/manga.txt"));
/// assert_eq!(dir, Path::new("out/manga"));
/// ```
pub fn output_dir_for(root: &Path, listing: &Path) -> PathBuf {
    let stem = listing
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_else(|| "output".into());
    root.join(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_strips_extension() {
        assert_eq!(
            output_dir_for(Path::new("."), Path::new("manga.txt")),
            Path::new("./manga")
        );
    }

    #[test]
    fn test_output_dir_without_extension() {
        assert_eq!(
            output_dir_for(Path::new("/data"), Path::new("/in/series")),
            Path::new("/data/series")
        );
    }

    #[test]
    fn test_output_dir_keeps_inner_dots() {
        assert_eq!(
            output_dir_for(Path::new("."), Path::new("vol.2.txt")),
            Path::new("./vol.2")
        );
    }
}
