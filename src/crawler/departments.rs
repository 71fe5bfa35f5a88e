//! Department directory extraction

use crate::crawler::parser::Page;
use crate::crawler::Fetcher;
use crate::model::Department;
use crate::url::{department_code, resolve_href};
use crate::HarvestError;

/// Container holding the department links on the directory page
const DESCRIPTION_SELECTOR: &str = ".description-text";

/// Fetches the directory page and lists every department on it
pub async fn list_departments(
    fetcher: &Fetcher,
    directory_url: &str,
) -> Result<Vec<Department>, HarvestError> {
    let body = fetcher.fetch(directory_url).await?;
    let departments = departments_from_html(&body, directory_url)?;
    tracing::debug!("Found {} departments", departments.len());
    Ok(departments)
}

/// Parses a directory page into departments
pub fn departments_from_html(html: &str, url: &str) -> Result<Vec<Department>, HarvestError> {
    extract_departments(&Page::parse(html, url))
}

/// Extracts one department per link inside the description containers
///
/// Every link must point at a `https://<code>.unibo` site. A single link that
/// does not aborts the extraction: the directory layout has changed and none of
/// its links can be trusted.
pub fn extract_departments(page: &Page) -> Result<Vec<Department>, HarvestError> {
    let mut departments = Vec::new();

    for container in page.select(DESCRIPTION_SELECTOR)? {
        for link in container.select("a")? {
            let href = link
                .attr("href")
                .ok_or_else(|| page.structure_error("department link without href"))?;

            let base_url = resolve_href(href, page.url()).ok_or_else(|| {
                page.structure_error(format!("unusable department link '{}'", href))
            })?;

            let code = department_code(&base_url).ok_or_else(|| {
                page.structure_error(format!(
                    "department link '{}' does not match https://<code>.unibo",
                    href
                ))
            })?;

            departments.push(Department {
                code,
                name: link.text_line(),
                base_url,
            });
        }
    }

    Ok(departments)
}
