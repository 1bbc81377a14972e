use crate::config::types::{Config, OutputConfig, PacingConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_pacing_config(&config.pacing)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target-site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if base.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must include a host, got '{}'",
            config.base_url
        )));
    }

    if !config.listing_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "listing-path must start with '/', got '{}'",
            config.listing_path
        )));
    }

    if config.guide_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "guide-prefix cannot be empty".to_string(),
        ));
    }

    if config.tutorial_marker.is_empty() {
        return Err(ConfigError::Validation(
            "tutorial-marker cannot be empty".to_string(),
        ));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates pacing delays
fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    if config.discovery_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "discovery-delay-ms must be <= 60000, got {}",
            config.discovery_delay_ms
        )));
    }

    if config.extraction_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "extraction-delay-ms must be <= 60000, got {}",
            config.extraction_delay_ms
        )));
    }

    Ok(())
}

/// Validates output settings
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "batch-size must be >= 1, got {}",
            config.batch_size
        )));
    }

    Ok(())
}
