use serde::Deserialize;

/// Main configuration structure for Chapter-Links
///
/// Every section is optional; a missing file or section falls back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub scheduler: SchedulerConfig,
    pub output: OutputConfig,
    pub extract: ExtractConfig,
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Static client identifier sent as the User-Agent header
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Maximum number of redirects followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("chapter-links/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
        }
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Chapters processed concurrently (0 = detect from hardware)
    #[serde(rename = "max-parallel")]
    pub max_parallel: usize,

    /// Upper bound applied to the detected parallelism
    #[serde(rename = "parallel-cap")]
    pub parallel_cap: usize,

    /// How new chapters are admitted once the pool is full
    pub admission: AdmissionPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_parallel: 0,
            parallel_cap: 8,
            admission: AdmissionPolicy::Replenish,
        }
    }
}

/// How chapters are admitted to the worker pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdmissionPolicy {
    /// Start a new chapter as soon as any slot frees up
    #[default]
    Replenish,

    /// Wait for the whole in-flight batch before admitting more
    Batched,
}

/// Output layout configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory in which the per-listing output directory is created
    #[serde(rename = "root-dir")]
    pub root_dir: String,

    /// File name of each chapter's link list
    #[serde(rename = "links-file")]
    pub links_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: ".".to_string(),
            links_file: "base.txt".to_string(),
        }
    }
}

/// Markup pattern used to locate resource links
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Element name (e.g., "img")
    pub tag: String,

    /// Attribute that marks an element as a resource
    #[serde(rename = "marker-attribute")]
    pub marker_attribute: String,

    /// Exact value the marker attribute must carry
    #[serde(rename = "marker-value")]
    pub marker_value: String,

    /// Attribute holding the resource link
    #[serde(rename = "source-attribute")]
    pub source_attribute: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            tag: "img".to_string(),
            marker_attribute: "class".to_string(),
            marker_value: "imgholder".to_string(),
            source_attribute: "src".to_string(),
        }
    }
}
