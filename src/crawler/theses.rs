//! Thesis tab extraction
//!
//! Entries are returned as raw markup, exactly as found on the page. Cleaning
//! them up for a given document dialect is the renderer's job. Group headings
//! are plain text on a single line.

use crate::crawler::parser::Page;
use crate::crawler::Fetcher;
use crate::model::{Theses, ThesisGroup, PROPOSED_HEADING};
use crate::url::thesis_url;
use crate::HarvestError;

/// Freeform block describing the proposed topics
const PROPOSED_SELECTOR: &str = ".inner-text";

/// One list of assigned theses, titled by its `h4`
const ASSIGNED_SELECTOR: &str = ".report-list";

/// Fetches the thesis tab of a faculty profile
pub async fn fetch_theses(
    fetcher: &Fetcher,
    profile_url: &str,
    suffix: &str,
) -> Result<Theses, HarvestError> {
    let url = thesis_url(profile_url, suffix);
    let body = fetcher.fetch(&url).await?;
    theses_from_html(&body, &url)
}

/// Parses a thesis tab into its proposed and assigned sections
pub fn theses_from_html(html: &str, url: &str) -> Result<Theses, HarvestError> {
    extract_theses(&Page::parse(html, url))
}

/// Extracts the proposed and assigned theses of a thesis tab
pub fn extract_theses(page: &Page) -> Result<Theses, HarvestError> {
    let mut proposed = ThesisGroup::new(PROPOSED_HEADING);
    for block in page.select(PROPOSED_SELECTOR)? {
        if !block.text().trim().is_empty() {
            proposed.items.push(block.inner_html().trim().to_string());
        }
    }

    let mut assigned = Vec::new();
    for list in page.select(ASSIGNED_SELECTOR)? {
        let heading = list
            .first("h4")?
            .map(|h| h.text_line())
            .unwrap_or_default();

        let mut group = ThesisGroup::new(heading);
        for entry in list.select("li")? {
            group.items.push(entry.inner_html().trim().to_string());
        }
        assigned.push(group);
    }

    Ok(Theses {
        proposed: if proposed.items.is_empty() {
            Vec::new()
        } else {
            vec![proposed]
        },
        assigned,
    })
}
