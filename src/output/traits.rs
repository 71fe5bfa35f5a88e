//! Output dialect traits and types
//!
//! This module defines the supported document formats and the [`Dialect`]
//! trait through which the generic renderer emits its template tokens.

use crate::model::{Department, FacultyMember};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

/// Markup dialect of the generated documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// AsciiDoc document (`.adoc`)
    #[serde(alias = "adoc")]
    #[value(name = "asciidoc", alias = "adoc")]
    AsciiDoc,

    /// LaTeX article (`.tex`)
    #[serde(alias = "tex")]
    #[value(name = "latex", alias = "tex")]
    Latex,
}

impl OutputFormat {
    /// File extension of documents in this format, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::AsciiDoc => "adoc",
            Self::Latex => "tex",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AsciiDoc => write!(f, "AsciiDoc"),
            Self::Latex => write!(f, "LaTeX"),
        }
    }
}

/// Template tokens of a document dialect
///
/// Implementations append to `out` and are responsible for translating raw
/// page text (entities, anchors, stray tags) into their own markup.
pub trait Dialect {
    /// Title and preamble of the document
    fn begin_document(&self, out: &mut String, department: &Department, date: NaiveDate);

    /// Section introducing a faculty member
    fn faculty_header(&self, out: &mut String, member: &FacultyMember);

    /// Proposed/assigned sub-section
    fn section_header(&self, out: &mut String, title: &str);

    /// Header of a single thesis group
    fn group_header(&self, out: &mut String, heading: &str);

    fn begin_list(&self, out: &mut String);

    /// One list entry built from raw item text
    fn item(&self, out: &mut String, raw: &str);

    fn end_list(&self, out: &mut String);

    fn end_document(&self, out: &mut String);
}
