//! Thesis Harvester: collects thesis listings from university department sites
//!
//! This crate crawls the department directory of a university website, walks the
//! faculty listing of each requested department, extracts the proposed and assigned
//! theses published on every faculty member's profile, and renders the result as an
//! AsciiDoc or LaTeX document.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Thesis Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Page structure changed at {url}: {message}")]
    PageStructure { url: String, message: String },

    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Failed to write {}: {}", .path.display(), .source)]
    Save {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl HarvestError {
    /// Returns true if the error means extracted data can no longer be trusted
    ///
    /// A page whose layout no longer matches the expected selectors or link
    /// patterns aborts the whole run instead of producing partial output.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::PageStructure { .. } | Self::Selector(_) | Self::Config(_)
        )
    }

    /// Returns the URL of the failed request, if the error came from the network
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { url, .. } | Self::Timeout { url } | Self::Http { url, .. } => {
                Some(url)
            }
            Self::PageStructure { url, .. } => Some(url),
            _ => None,
        }
    }
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

// Re-export commonly used types
pub use config::Config;
pub use model::{Department, FacultyMember, ThesisGroup, Theses};
pub use output::OutputFormat;
