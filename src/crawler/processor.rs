//! Per-chapter pipeline
//!
//! For one chapter this module:
//! - Reuses a link count already extracted earlier in this process, if any
//! - Otherwise fetches the page and extracts its links
//! - Skips the chapter when its persisted output already holds that many links
//! - Writes the links otherwise
//!
//! Every error is caught here and turned into `ChapterOutcome::Failed`, so one
//! chapter can never abort or cancel its siblings.

use crate::crawler::{ExtractedLinkSet, Fetcher, LinkExtractor};
use crate::state::{ChapterOutcome, ExpectedCountCache};
use crate::storage::ResumeStore;
use crate::ChapterError;
use std::sync::Arc;

/// Runs the fetch / extract / resume / persist sequence for single chapters
///
/// One processor is shared by all workers of a run (and may be reused for
/// later runs in the same process, which keeps its count cache warm).
pub struct ChapterProcessor {
    fetcher: Arc<dyn Fetcher>,
    extractor: LinkExtractor,
    store: Arc<dyn ResumeStore>,
    cache: ExpectedCountCache,
}

impl ChapterProcessor {
    /// Creates a processor with an empty count cache
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: LinkExtractor,
        store: Arc<dyn ResumeStore>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            store,
            cache: ExpectedCountCache::new(),
        }
    }

    /// Counts extracted so far in this process
    pub fn cache(&self) -> &ExpectedCountCache {
        &self.cache
    }

    /// Processes one chapter to a terminal outcome
    ///
    /// Never returns an error: failures are reported as `ChapterOutcome::Failed`.
    pub async fn process(&self, chapter: u32, url: &str) -> ChapterOutcome {
        let outcome = match self.run_steps(chapter, url).await {
            Ok(outcome) => outcome,
            Err(e) => ChapterOutcome::Failed(e.to_string()),
        };

        match &outcome {
            ChapterOutcome::Processed(count) => {
                tracing::info!("[OK] Chapter {:>3} -> {} images", chapter, count);
            }
            ChapterOutcome::Skipped(count) => {
                tracing::info!(
                    "[SKIP] Chapter {:>3} -> already processed ({} images)",
                    chapter,
                    count
                );
            }
            ChapterOutcome::Failed(reason) => {
                tracing::warn!("[FAIL] Chapter {:>3} -> {}", chapter, reason);
            }
        }

        outcome
    }

    async fn run_steps(&self, chapter: u32, url: &str) -> Result<ChapterOutcome, ChapterError> {
        if let Some(expected) = self.cache.get(chapter) {
            if self.store.is_complete(chapter, expected)? {
                return Ok(ChapterOutcome::Skipped(expected));
            }
            // A cached count never stands in for missing output
            tracing::debug!(
                "Chapter {} output does not match cached count {}, fetching again",
                chapter,
                expected
            );
        }

        let extracted = self.fetch_and_extract(chapter, url).await?;
        let expected = extracted.extracted_count();
        self.cache.insert(chapter, expected);

        if self.store.is_complete(chapter, expected)? {
            return Ok(ChapterOutcome::Skipped(expected));
        }

        self.store.persist(chapter, &extracted.links)?;
        Ok(ChapterOutcome::Processed(expected))
    }

    async fn fetch_and_extract(
        &self,
        chapter: u32,
        url: &str,
    ) -> Result<ExtractedLinkSet, ChapterError> {
        tracing::debug!("Fetching chapter {} from {}", chapter, url);
        let markup = self.fetcher.fetch(url).await?;
        let extracted = self.extractor.extract_set(chapter, &markup);
        tracing::trace!(
            "Chapter {}: {} bytes of markup, {} links",
            chapter,
            markup.len(),
            extracted.extracted_count()
        );
        Ok(extracted)
    }
}
