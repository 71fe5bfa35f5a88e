use crate::config::types::{ClientConfig, Config, OutputConfig, SourceConfig};
use crate::url::CODE_PLACEHOLDER;
use crate::ConfigError;
use url::Url;

/// Largest number of thesis pages fetched at the same time
const MAX_CONCURRENCY: usize = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_client_config(&config.client)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the page locations
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_http_url("directory-url", &config.directory_url)?;

    if !config.faculty_listing_url.contains(CODE_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "faculty-listing-url must contain the {} placeholder, got '{}'",
            CODE_PLACEHOLDER, config.faculty_listing_url
        )));
    }
    // Substitute a plausible code so the template itself can be checked
    validate_http_url(
        "faculty-listing-url",
        &config.faculty_listing_url.replace(CODE_PLACEHOLDER, "code"),
    )?;

    if config.thesis_tab_suffix.is_empty() {
        return Err(ConfigError::Validation(
            "thesis-tab-suffix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use HTTP or HTTPS, got '{}'",
            key, value
        )));
    }

    Ok(())
}
