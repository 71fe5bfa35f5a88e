//! Faculty listing extraction

use crate::crawler::parser::Page;
use crate::crawler::Fetcher;
use crate::model::FacultyMember;
use crate::url::{listing_url, resolve_href};
use crate::HarvestError;

const CARDS_SELECTOR: &str = ".picture-cards";
const ITEM_SELECTOR: &str = ".item";
const TEXT_SELECTOR: &str = ".text-wrap";

/// Fetches the faculty listing of a department
///
/// `template` is the listing URL with a `{code}` placeholder.
pub async fn list_faculty(
    fetcher: &Fetcher,
    template: &str,
    code: &str,
) -> Result<Vec<FacultyMember>, HarvestError> {
    let url = listing_url(template, code);
    let body = fetcher.fetch(&url).await?;
    let members = faculty_from_html(&body, &url)?;
    tracing::debug!("Found {} faculty members in {}", members.len(), code);
    Ok(members)
}

/// Parses a faculty listing page into faculty members
pub fn faculty_from_html(html: &str, url: &str) -> Result<Vec<FacultyMember>, HarvestError> {
    extract_faculty(&Page::parse(html, url))
}

/// Extracts one faculty member per card item
///
/// The first link of a card's text block is the profile link and its first
/// paragraph is the role. A card without a usable profile link aborts the
/// extraction.
pub fn extract_faculty(page: &Page) -> Result<Vec<FacultyMember>, HarvestError> {
    let mut members = Vec::new();

    for cards in page.select(CARDS_SELECTOR)? {
        for item in cards.select(ITEM_SELECTOR)? {
            let info = item
                .first(TEXT_SELECTOR)?
                .ok_or_else(|| page.structure_error("faculty card without text block"))?;

            let link = info
                .first("a")?
                .ok_or_else(|| page.structure_error("faculty card without profile link"))?;

            let href = link
                .attr("href")
                .ok_or_else(|| page.structure_error("faculty profile link without href"))?;

            let profile_url = resolve_href(href, page.url()).ok_or_else(|| {
                page.structure_error(format!("unusable faculty profile link '{}'", href))
            })?;

            let role = info
                .first("p")?
                .map(|p| p.text_line())
                .unwrap_or_default();

            members.push(FacultyMember::new(link.text_line(), role, profile_url));
        }
    }

    Ok(members)
}
