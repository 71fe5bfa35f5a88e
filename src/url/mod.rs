//! URL handling module for Thesis Harvester
//!
//! This module builds the URLs the crawler visits and extracts department codes
//! from the links found on the directory page.

mod domain;
mod resolve;

pub use domain::department_code;
pub use resolve::resolve_href;

/// Placeholder replaced by the department code in the faculty listing template
pub const CODE_PLACEHOLDER: &str = "{code}";

/// Builds the faculty listing URL of a department
///
/// # Examples
///
/// ```
/// use thesis_harvester::url::listing_url;
///
/// let url = listing_url("https://{code}.unibo.it/people?pagesize=100", "disi");
/// assert_eq!(url, "https://disi.unibo.it/people?pagesize=100");
/// ```
pub fn listing_url(template: &str, code: &str) -> String {
    template.replace(CODE_PLACEHOLDER, code)
}

/// Builds the thesis tab URL of a faculty profile
///
/// The suffix is appended verbatim, so a trailing slash on the profile URL is
/// dropped first to avoid a double slash.
pub fn thesis_url(profile_url: &str, suffix: &str) -> String {
    let base = if suffix.starts_with('/') {
        profile_url.trim_end_matches('/')
    } else {
        profile_url
    };
    format!("{}{}", base, suffix)
}
