//! Configuration module for Chapter-Links
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so `Config::default()` is a
//! complete, valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use chapter_links::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("chapter-links.toml")).unwrap();
//! println!("Fetch timeout: {}s", config.fetch.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AdmissionPolicy, Config, ExtractConfig, FetchConfig, OutputConfig, SchedulerConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
