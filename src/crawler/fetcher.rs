//! HTTP fetcher implementation
//!
//! This module is the network boundary of the pipeline:
//! - The `Fetcher` trait, which the chapter processor depends on
//! - Building HTTP clients with the static client token, timeout and redirect policy
//! - GET requests for chapter pages
//! - Error classification into `FetchError` causes
//!
//! Tests substitute the trait with fakes that return canned markup.

use crate::config::FetchConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Retrieves raw markup for a chapter URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the body at `url`
    ///
    /// Timeout and client identity are properties of the implementation.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use chapter_links::config::FetchConfig;
/// use chapter_links::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `Fetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from configuration
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let target = parse_target(url)?;

        let response = self
            .client
            .get(target.clone())
            .send()
            .await
            .map_err(|e| FetchError::new(url, classify_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(url, format!("HTTP {}", status)));
        }

        if response.url() != &target {
            tracing::debug!("{} redirected to {}", url, response.url());
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::new(url, classify_error(&e)))
    }
}

/// Validates that a listing URL can be requested
fn parse_target(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::new(url, format!("invalid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::new(
            url,
            format!("unsupported URL scheme '{}'", other),
        )),
    }
}

/// Describes a transport error for reporting
fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_redirect() {
        format!("redirect error: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else if e.is_decode() || e.is_body() {
        format!("failed to read response body: {}", e)
    } else {
        e.to_string()
    }
}
