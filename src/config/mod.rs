//! Configuration module for Thesis Harvester
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so the crawler runs without any file at all; the
//! command line overrides whatever the file sets.
//!
//! # Example
//!
//! ```no_run
//! use thesis_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvester.toml")).unwrap();
//! println!("Requests time out after {}s", config.client.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClientConfig, Config, OutputConfig, SourceConfig, DEFAULT_DIRECTORY_URL,
    DEFAULT_FACULTY_LISTING_URL, DEFAULT_OUTPUT_DIR, DEFAULT_THESIS_TAB_SUFFIX,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
