//! AsciiDoc dialect

use crate::model::{Department, FacultyMember};
use crate::output::markup::{break_lines, decode_entities, map_anchors, single_line, strip_tags};
use crate::output::traits::Dialect;
use chrono::NaiveDate;

/// Renders documents as AsciiDoc with a table of contents
///
/// Multi-line entries become list items with attached continuation blocks.
pub struct AsciiDoc;

impl AsciiDoc {
    /// Translates raw item text into AsciiDoc lines
    ///
    /// Anchors become `link:` macros, block-ending tags become line breaks and
    /// every other tag is dropped. Blank lines are removed.
    pub fn lines(raw: &str) -> Vec<String> {
        let text = map_anchors(
            &break_lines(raw),
            |href, label| format!("link:{}[{}]", href, label.replace(']', "\\]")),
            |text| decode_entities(&strip_tags(text)),
        );

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Dialect for AsciiDoc {
    fn begin_document(&self, out: &mut String, department: &Department, date: NaiveDate) {
        out.push_str(&format!("= Theses of {}\n", single_line(&department.name)));
        out.push_str(":toc:\n");
        out.push_str(&format!(":revdate: {}\n", date.format("%Y-%m-%d")));
    }

    fn faculty_header(&self, out: &mut String, member: &FacultyMember) {
        out.push_str(&format!("\n== {}\n", single_line(&member.name)));
        out.push_str(&format!(
            "{} | {}[website]\n",
            single_line(&member.role),
            member.profile_url
        ));
    }

    fn section_header(&self, out: &mut String, title: &str) {
        out.push_str(&format!("\n=== {}\n", single_line(title)));
    }

    fn group_header(&self, out: &mut String, heading: &str) {
        out.push_str(&format!("\n==== {}\n", single_line(heading)));
    }

    fn begin_list(&self, out: &mut String) {
        out.push('\n');
    }

    fn item(&self, out: &mut String, raw: &str) {
        let lines = Self::lines(raw);
        let Some((first, rest)) = lines.split_first() else {
            return;
        };

        out.push_str(&format!("* {}\n", first));
        for line in rest {
            out.push_str(&format!("+\n{}\n", line));
        }
    }

    fn end_list(&self, _out: &mut String) {}

    fn end_document(&self, _out: &mut String) {}
}
