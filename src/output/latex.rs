//! LaTeX dialect

use crate::model::{Department, FacultyMember};
use crate::output::markup::{decode_entities, map_anchors, single_line, strip_tags};
use crate::output::traits::Dialect;
use chrono::NaiveDate;

/// Characters escaped with a backslash in running text
const RESERVED: &[char] = &['&', '#', '%', '$', '_'];

/// Characters escaped with a backslash inside `\href` targets
const RESERVED_IN_URL: &[char] = &['&', '#', '%'];

/// Renders documents as a LaTeX article with `hyperref` links
///
/// Entries are single paragraphs: line breaks in the source collapse to spaces.
pub struct Latex;

impl Latex {
    /// Escapes LaTeX reserved characters, leaving every other character alone
    ///
    /// # Examples
    ///
    /// ```
    /// use thesis_harvester::output::Latex;
    ///
    /// assert_eq!(Latex::escape("R&D #1"), "R\\&D \\#1");
    /// ```
    pub fn escape(text: &str) -> String {
        escape_chars(text, RESERVED)
    }

    /// Translates raw item text into one LaTeX paragraph
    ///
    /// Anchors become underlined `\href` links, other tags, newlines and `&nbsp;`
    /// become spaces and reserved characters are escaped.
    pub fn text(raw: &str) -> String {
        map_anchors(
            raw,
            |href, label| {
                format!(
                    "\\underline{{\\href{{{}}}{{{}}}}}",
                    escape_chars(href, RESERVED_IN_URL),
                    Self::escape(label)
                )
            },
            |text| Self::escape(&decode_entities(&strip_tags(text)).replace('\n', " ")),
        )
        .trim()
        .to_string()
    }
}

fn escape_chars(text: &str, reserved: &[char]) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if reserved.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl Dialect for Latex {
    fn begin_document(&self, out: &mut String, department: &Department, date: NaiveDate) {
        out.push_str("\\documentclass[a4paper]{article}\n");
        out.push_str("\\usepackage[utf8]{inputenc}\n");
        out.push_str("\\usepackage[T1]{fontenc}\n");
        out.push_str("\\usepackage{enumerate}\n");
        out.push_str("\\usepackage{hyperref}\n");
        out.push_str(&format!(
            "\\title{{Theses of {}}}\n",
            Self::escape(&single_line(&department.name))
        ));
        out.push_str(&format!("\\date{{{}}}\n", date.format("%Y-%m-%d")));
        out.push_str("\\begin{document}\n");
        out.push_str("\\maketitle\n");
        out.push_str("\\tableofcontents\n");
    }

    fn faculty_header(&self, out: &mut String, member: &FacultyMember) {
        out.push_str(&format!(
            "\n\\section{{{}}}\n",
            Self::escape(&single_line(&member.name))
        ));
        out.push_str(&format!(
            "{} | \\underline{{\\href{{{}}}{{website}}}}\n",
            Self::escape(&single_line(&member.role)),
            escape_chars(&member.profile_url, RESERVED_IN_URL)
        ));
    }

    fn section_header(&self, out: &mut String, title: &str) {
        out.push_str(&format!(
            "\n\\subsection{{{}}}\n",
            Self::escape(&single_line(title))
        ));
    }

    fn group_header(&self, out: &mut String, heading: &str) {
        out.push_str(&format!(
            "\n\\subsubsection{{{}}}\n",
            Self::escape(&single_line(heading))
        ));
    }

    fn begin_list(&self, out: &mut String) {
        out.push_str("\\begin{itemize}\n");
    }

    fn item(&self, out: &mut String, raw: &str) {
        let text = Self::text(raw);
        if !text.is_empty() {
            out.push_str(&format!("  \\item {}\n", text));
        }
    }

    fn end_list(&self, out: &mut String) {
        out.push_str("\\end{itemize}\n");
    }

    fn end_document(&self, out: &mut String) {
        out.push_str("\n\\end{document}\n");
    }
}
