//! Resume store trait
//!
//! This module defines the interface the chapter processor uses to read and
//! write per-chapter output.

use crate::PersistError;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, PersistError>;

/// Trait for per-chapter output backends
///
/// Completeness is decided by *count equality*: a chapter is complete when its
/// persisted output holds exactly as many links as a fresh extraction produced.
/// Content is never compared, so an output with the same number of different
/// links also counts as complete. This keeps the check cheap.
///
/// Implementations must be safe to call concurrently for different chapters.
pub trait ResumeStore: Send + Sync {
    /// Number of links in the chapter's persisted output
    ///
    /// # Returns
    ///
    /// * `Ok(Some(n))` - Output exists with `n` entries (0 if empty)
    /// * `Ok(None)` - No output has been written for this chapter
    /// * `Err(PersistError)` - The output exists but could not be read
    fn prior_count(&self, chapter: u32) -> StorageResult<Option<usize>>;

    /// Writes the ordered links as the chapter's output, replacing any prior output
    fn persist(&self, chapter: u32, links: &[String]) -> StorageResult<()>;

    /// Returns true iff the persisted count equals `expected`
    ///
    /// An empty-but-present output is complete for `expected == 0`; a missing
    /// output is never complete.
    fn is_complete(&self, chapter: u32, expected: usize) -> StorageResult<bool> {
        Ok(self.prior_count(chapter)? == Some(expected))
    }
}
