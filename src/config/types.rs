use crate::output::OutputFormat;
use serde::Deserialize;
use std::path::PathBuf;

/// Directory page listing every department
pub const DEFAULT_DIRECTORY_URL: &str =
    "https://www.unibo.it/it/ateneo/sedi-e-strutture/dipartimenti";

/// Faculty listing of a department; `{code}` is replaced by the department code.
/// The huge page size makes the site return every member on one page.
pub const DEFAULT_FACULTY_LISTING_URL: &str = "https://{code}.unibo.it/it/dipartimento/persone/docenti-e-ricercatori?pagenumber=1&pagesize=100000000&order=asc&sort=Cognome&";

/// Appended to a profile URL to reach its thesis tab
pub const DEFAULT_THESIS_TAB_SUFFIX: &str = "/didattica?tab=tesi";

pub const DEFAULT_OUTPUT_DIR: &str = "site";

/// Main configuration structure for Thesis Harvester
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub client: ClientConfig,
    pub output: OutputConfig,
}

/// Where the crawler finds its pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourceConfig {
    /// Department directory page
    pub directory_url: String,

    /// Faculty listing template containing `{code}`
    pub faculty_listing_url: String,

    /// Suffix leading from a profile page to its thesis tab
    pub thesis_tab_suffix: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            faculty_listing_url: DEFAULT_FACULTY_LISTING_URL.to_string(),
            thesis_tab_suffix: DEFAULT_THESIS_TAB_SUFFIX.to_string(),
        }
    }
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientConfig {
    /// Upper bound for a single navigation, in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Number of thesis pages fetched at the same time within a department
    pub concurrency: usize,

    /// Log every URL before it is requested
    pub log_visits: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            user_agent: format!("thesis-harvester/{}", env!("CARGO_PKG_VERSION")),
            concurrency: 1,
            log_visits: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving one file per department
    pub directory: PathBuf,

    /// Markup dialect of the generated documents
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::AsciiDoc,
        }
    }
}
