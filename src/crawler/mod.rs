//! Crawler module for the department, faculty and thesis pages
//!
//! This module contains the extraction pipeline:
//! - HTTP fetching with a per-request timeout
//! - HTML querying through CSS selectors
//! - Department, faculty and thesis extraction
//! - Overall run coordination

mod coordinator;
mod departments;
mod faculty;
mod fetcher;
mod parser;
mod theses;

pub use coordinator::{format_department_list, resolve_codes, Coordinator, RunReport, Selection};
pub use departments::{departments_from_html, extract_departments, list_departments};
pub use faculty::{extract_faculty, faculty_from_html, list_faculty};
pub use fetcher::{build_http_client, Fetcher};
pub use parser::{selector, Element, Page};
pub use theses::{extract_theses, fetch_theses, theses_from_html};

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete harvest
///
/// This is the main entry point for a run. It will:
/// 1. List the departments from the directory page
/// 2. Resolve the requested department codes
/// 3. List the faculty of every resolved department
/// 4. Fetch the theses of every faculty member
/// 5. Render and save one document per department
///
/// # Arguments
///
/// * `config` - The harvester configuration
/// * `selection` - Which departments to process
///
/// # Returns
///
/// * `Ok(RunReport)` - Run finished; the report tells which departments failed
/// * `Err(HarvestError)` - Run aborted on a fatal error
pub async fn harvest(config: Config, selection: &Selection) -> Result<RunReport, HarvestError> {
    Coordinator::new(config)?.run(selection).await
}
