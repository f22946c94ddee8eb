//! Chapter-Links: a resumable chapter link harvester
//!
//! This crate fetches a numbered sequence of chapter pages, extracts the
//! embedded image links from each page, and persists them per chapter so that
//! repeated runs skip chapters whose output is already complete.

pub mod config;
pub mod crawler;
pub mod index;
pub mod output;
pub mod state;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Chapter-Links operations
#[derive(Debug, Error)]
pub enum ChapterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot open chapter listing {path}: {source}")]
    MalformedInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("Invalid chapter range {start}..={end}: {reason}")]
    InvalidRange { start: u32, end: u32, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A chapter page could not be retrieved
#[derive(Debug, Clone, Error)]
#[error("Failed to fetch {url}: {cause}")]
pub struct FetchError {
    pub url: String,
    pub cause: String,
}

impl FetchError {
    pub fn new(url: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cause: cause.into(),
        }
    }
}

/// A chapter's output could not be read or written
#[derive(Debug, Error)]
#[error("Failed to persist chapter {chapter} at {}: {source}", path.display())]
pub struct PersistError {
    pub chapter: u32,
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid extraction rule: {0}")]
    InvalidRule(String),
}

/// Result type alias for Chapter-Links operations
pub type Result<T> = std::result::Result<T, ChapterError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    AdmissionPolicy, ChapterProcessor, ExtractionRule, Fetcher, HttpFetcher, LinkExtractor,
    RunReport, Scheduler,
};
pub use index::{ChapterLink, LinkIndex};
pub use state::{ChapterOutcome, ExpectedCountCache, RunStatistics, StatsCollector};
pub use storage::{DirectoryStore, ResumeStore};
