/// Terminal outcome definitions for chapter processing
///
/// Every dispatched chapter produces exactly one outcome.
use std::fmt;

/// The tagged result of processing one chapter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChapterOutcome {
    /// Links were extracted and written; carries the link count
    Processed(usize),

    /// Existing output already held the expected number of links
    Skipped(usize),

    /// Fetching or persisting failed; carries the cause
    Failed(String),
}

impl ChapterOutcome {
    /// Returns true if the chapter's output was written in this run
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed(_))
    }

    /// Returns true if the chapter was already complete
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// Returns true if processing failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Link count for successful outcomes
    pub fn link_count(&self) -> Option<usize> {
        match self {
            Self::Processed(count) | Self::Skipped(count) => Some(*count),
            Self::Failed(_) => None,
        }
    }
}

impl fmt::Display for ChapterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processed(count) => write!(f, "{} images", count),
            Self::Skipped(count) => write!(f, "already processed ({} images)", count),
            Self::Failed(reason) => write!(f, "{}", reason),
        }
    }
}
