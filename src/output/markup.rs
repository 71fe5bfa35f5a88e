//! Cleanup of raw page text
//!
//! Thesis text keeps whatever markup the site put in it. These helpers decode
//! entities, find anchors, strip the remaining tags and normalize whitespace.

use regex::Regex;
use std::sync::OnceLock;

fn anchor_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#)
            .expect("valid regex")
    })
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid regex"))
}

fn line_break_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</p\s*>|</div\s*>|</li\s*>").expect("valid regex")
    })
}

fn horizontal_space_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^\S\n]{2,}").expect("valid regex"))
}

fn blank_lines_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n{3,}").expect("valid regex"))
}

/// Decodes the entities the site emits; `&nbsp;` becomes a plain space
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Replaces every tag with a single space
pub fn strip_tags(text: &str) -> String {
    tag_pattern().replace_all(text, " ").into_owned()
}

/// Turns block-ending tags (`<br>`, `</p>`, `</div>`, `</li>`) into newlines
pub fn break_lines(text: &str) -> String {
    line_break_pattern().replace_all(text, "\n").into_owned()
}

/// Visible text of a markup fragment on a single line
pub fn plain_text(fragment: &str) -> String {
    decode_entities(&strip_tags(fragment))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins the words of already-plain text with single spaces
///
/// Headers are one line in both dialects, so a newline left inside a name or
/// heading would end the header early.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rebuilds `raw`, passing anchors through `link` and everything else through `text`
///
/// `link` receives the decoded href and the plain text of the anchor label.
/// Stretches between anchors reach `text` untouched.
pub fn map_anchors<L, T>(raw: &str, link: L, text: T) -> String
where
    L: Fn(&str, &str) -> String,
    T: Fn(&str) -> String,
{
    let mut out = String::with_capacity(raw.len());
    let mut last = 0;

    for caps in anchor_pattern().captures_iter(raw) {
        let (Some(whole), Some(href), Some(label)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        out.push_str(&text(&raw[last..whole.start()]));
        out.push_str(&link(&decode_entities(href.as_str().trim()), &plain_text(label.as_str())));
        last = whole.end();
    }
    out.push_str(&text(&raw[last..]));

    out
}

/// Collapses whitespace runs across a rendered document
///
/// Runs of two or more spaces or tabs become one space and more than one blank
/// line in a row becomes a single blank line. Line structure is kept because
/// both dialects depend on it. Applying it twice changes nothing.
pub fn collapse_whitespace(text: &str) -> String {
    let collapsed = horizontal_space_pattern().replace_all(text, " ");
    blank_lines_pattern()
        .replace_all(&collapsed, "\n\n")
        .into_owned()
}
