use serde::Deserialize;

/// Main configuration structure for Tsumugi
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target-site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Origin of the tutorial site (e.g. "https://drupalize.me")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Listing path with a trailing page-index query parameter; the page
    /// number is appended verbatim
    #[serde(rename = "listing-path", default = "default_listing_path")]
    pub listing_path: String,

    /// Path prefix identifying guide links on listing pages
    #[serde(rename = "guide-prefix", default = "default_guide_prefix")]
    pub guide_prefix: String,

    /// Path fragment identifying tutorial links on guide pages
    #[serde(rename = "tutorial-marker", default = "default_tutorial_marker")]
    pub tutorial_marker: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Inter-request pacing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Pause after each discovery-phase request (milliseconds)
    #[serde(rename = "discovery-delay-ms", default = "default_discovery_delay")]
    pub discovery_delay_ms: u64,

    /// Pause after each extraction-phase request (milliseconds)
    #[serde(rename = "extraction-delay-ms", default = "default_extraction_delay")]
    pub extraction_delay_ms: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the catalog and batch artifacts
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Number of extracted records per batch artifact
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_listing_path() -> String {
    "/search?f[0]=type:guide&page=".to_string()
}

fn default_guide_prefix() -> String {
    "/guide/".to_string()
}

fn default_tutorial_marker() -> String {
    "/tutorial/".to_string()
}

fn default_user_agent() -> String {
    format!("tsumugi/{}", env!("CARGO_PKG_VERSION"))
}

fn default_discovery_delay() -> u64 {
    500
}

fn default_extraction_delay() -> u64 {
    1000
}

fn default_directory() -> String {
    "./harvest".to_string()
}

fn default_batch_size() -> usize {
    50
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://drupalize.me".to_string(),
            listing_path: default_listing_path(),
            guide_prefix: default_guide_prefix(),
            tutorial_marker: default_tutorial_marker(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            discovery_delay_ms: default_discovery_delay(),
            extraction_delay_ms: default_extraction_delay(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            batch_size: default_batch_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            pacing: PacingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}
