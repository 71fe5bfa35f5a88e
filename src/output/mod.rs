//! Output module for rendering and saving harvested theses
//!
//! This module handles:
//! - Rendering a department's faculty and theses in a document dialect
//! - Translating raw page markup into the dialect's own syntax
//! - Writing one document per department to the output directory

mod asciidoc;
mod latex;
pub mod markup;
mod traits;

pub use asciidoc::AsciiDoc;
pub use latex::Latex;
pub use markup::collapse_whitespace;
pub use traits::{Dialect, OutputFormat};

use crate::model::{Department, FacultyMember};
use crate::HarvestError;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Title of the sub-section holding proposed theses
pub const PROPOSED_SECTION: &str = "Proposed";

/// Title of the sub-section holding assigned theses
pub const ASSIGNED_SECTION: &str = "Assigned";

/// Heading used for thesis groups the page left untitled
pub const UNTITLED_GROUP: &str = "Other";

/// Returns the dialect implementing `format`
pub fn dialect(format: OutputFormat) -> &'static dyn Dialect {
    match format {
        OutputFormat::AsciiDoc => &AsciiDoc,
        OutputFormat::Latex => &Latex,
    }
}

/// Renders one department as a document in `format`
///
/// # Arguments
///
/// * `format` - The target dialect
/// * `department` - The department named in the title
/// * `members` - Faculty members in listing order, theses attached
/// * `date` - Date stamped on the document
pub fn render_document(
    format: OutputFormat,
    department: &Department,
    members: &[FacultyMember],
    date: NaiveDate,
) -> String {
    render_with(dialect(format), department, members, date)
}

/// Renders one department through an arbitrary dialect
///
/// The structure is the same for every dialect: title, then per faculty member
/// a section with the proposed and assigned sub-sections, then one header per
/// thesis group followed by its entries. The whole text goes through
/// [`collapse_whitespace`] last.
pub fn render_with(
    dialect: &dyn Dialect,
    department: &Department,
    members: &[FacultyMember],
    date: NaiveDate,
) -> String {
    let mut out = String::new();
    dialect.begin_document(&mut out, department, date);

    for member in members {
        dialect.faculty_header(&mut out, member);

        let sections = [
            (PROPOSED_SECTION, &member.theses.proposed),
            (ASSIGNED_SECTION, &member.theses.assigned),
        ];
        for (title, groups) in sections {
            dialect.section_header(&mut out, title);

            for group in groups {
                let heading = markup::single_line(&group.heading);
                let heading = if heading.is_empty() {
                    UNTITLED_GROUP
                } else {
                    heading.as_str()
                };
                dialect.group_header(&mut out, heading);

                if group.items.iter().all(|item| markup::plain_text(item).is_empty()) {
                    continue;
                }

                dialect.begin_list(&mut out);
                for item in &group.items {
                    dialect.item(&mut out, item);
                }
                dialect.end_list(&mut out);
            }
        }
    }

    dialect.end_document(&mut out);
    collapse_whitespace(&out)
}

/// Path of the document of department `code` inside `directory`
pub fn document_path(directory: &Path, code: &str, format: OutputFormat) -> PathBuf {
    directory.join(format!("{}.{}", code, format.extension()))
}

/// Writes a rendered document to `<directory>/<code>.<ext>`
///
/// The directory is created, parents included, if it does not exist.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(HarvestError::Save)` - The directory or file could not be written
pub fn save_document(
    directory: &Path,
    code: &str,
    format: OutputFormat,
    document: &str,
) -> Result<PathBuf, HarvestError> {
    std::fs::create_dir_all(directory).map_err(|source| HarvestError::Save {
        path: directory.to_path_buf(),
        source,
    })?;

    let path = document_path(directory, code, format);
    std::fs::write(&path, document).map_err(|source| HarvestError::Save {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
