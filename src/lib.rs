//! Tsumugi: a patient tutorial-site harvester
//!
//! This crate implements a two-phase pipeline over a tutorial website:
//! discovery paginates a listing endpoint and builds a guide/tutorial
//! catalog, extraction fetches every tutorial and persists structured
//! content in batched JSON artifacts. Both phases run strictly
//! sequentially under fixed inter-request pacing.

pub mod batch;
pub mod catalog;
pub mod config;
pub mod discover;
pub mod dom;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod sink;

use thiserror::Error;

/// Main error type for Tsumugi operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] fetch::FetchError),

    #[error("Sink error: {0}")]
    Sink(#[from] sink::SinkError),

    #[error("Malformed catalog document: {message}")]
    Catalog { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Tsumugi operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use batch::{Batch, BatchWriter};
pub use catalog::{Catalog, DiscoveryError, Guide, TutorialLink, TutorialRef};
pub use config::Config;
pub use extract::{ContentExtractor, ExtractedContent, TutorialRecord};
pub use fetch::{FetchError, HttpFetcher, PageFetcher, Pacer, RateLimitedFetcher, TokioPacer};
pub use sink::{ArtifactSink, FsSink};
