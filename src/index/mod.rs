//! Chapter listing index
//!
//! The input listing is plain text in which a `# Chapter <n>` line opens an
//! entry and the line immediately after it holds that chapter's URL:
//!
//! ```text
//! # Chapter 1
//! https://example.com/read/1
//! # Chapter 2
//! https://example.com/read/2
//! ```
//!
//! Ingestion is lenient: lines that do not open an entry are ignored, and a
//! marker without a usable chapter number is skipped. Only a listing that
//! cannot be opened is an error.

mod parser;

pub use parser::{parse_chapter_marker, CHAPTER_MARKER};

use crate::ChapterError;
use std::collections::BTreeMap;
use std::path::Path;

/// A chapter number and the page it is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterLink {
    pub chapter: u32,
    pub url: String,
}

/// Read-only mapping from chapter number to source URL
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    links: BTreeMap<u32, String>,
}

impl LinkIndex {
    /// Loads a listing from disk
    ///
    /// # Returns
    ///
    /// * `Ok(LinkIndex)` - The parsed listing (possibly empty)
    /// * `Err(ChapterError::MalformedInput)` - The file could not be opened or read
    ///
    /// Content need not be UTF-8; invalid bytes are replaced before parsing.
    pub fn load(path: &Path) -> Result<Self, ChapterError> {
        let bytes = std::fs::read(path).map_err(|source| ChapterError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })?;

        let index = Self::parse(&String::from_utf8_lossy(&bytes));
        match index.bounds() {
            Some((first, last)) => tracing::debug!(
                "Loaded {} chapter links (chapters {}-{}) from {}",
                index.len(),
                first,
                last,
                path.display()
            ),
            None => tracing::debug!("No chapter links found in {}", path.display()),
        }
        for link in index.iter() {
            tracing::trace!("Chapter {} -> {}", link.chapter, link.url);
        }
        Ok(index)
    }

    /// Parses listing text
    ///
    /// A duplicate chapter number replaces the earlier entry.
    pub fn parse(content: &str) -> Self {
        let mut links = BTreeMap::new();
        let mut lines = content.lines();

        while let Some(line) = lines.next() {
            if !line.starts_with(CHAPTER_MARKER) {
                continue;
            }

            let Some(chapter) = parse_chapter_marker(line) else {
                tracing::trace!("Ignoring chapter marker without a number: {:?}", line);
                continue;
            };

            // The URL line is consumed even when it looks like another marker
            if let Some(url_line) = lines.next() {
                let url = url_line.trim().to_string();
                if let Some(previous) = links.insert(chapter, url) {
                    tracing::debug!("Chapter {} listed twice, replacing {}", chapter, previous);
                }
            }
        }

        Self { links }
    }

    /// Looks up the URL for a chapter
    pub fn get(&self, chapter: u32) -> Option<&str> {
        self.links.get(&chapter).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterates entries in increasing chapter order
    pub fn iter(&self) -> impl Iterator<Item = ChapterLink> + '_ {
        self.links.iter().map(|(chapter, url)| ChapterLink {
            chapter: *chapter,
            url: url.clone(),
        })
    }

    /// Lowest and highest chapter numbers present
    pub fn bounds(&self) -> Option<(u32, u32)> {
        let first = self.links.keys().next()?;
        let last = self.links.keys().next_back()?;
        Some((*first, *last))
    }
}
