use regex::Regex;
use std::sync::OnceLock;

/// Matches the subdomain of a department site link
fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"https://([^/.]+(?:\.[^/.]+)*?)\.unibo").expect("valid regex")
    })
}

/// Extracts the department code from a department site link
///
/// The code is the subdomain in front of `.unibo`, lowercased. Links that do not
/// follow the `https://<code>.unibo` shape yield `None`.
///
/// # Examples
///
/// ```
/// use thesis_harvester::url::department_code;
///
/// assert_eq!(department_code("https://disi.unibo.it/it"), Some("disi".to_string()));
/// assert_eq!(department_code("https://DIFA.unibo.it"), Some("difa".to_string()));
/// assert_eq!(department_code("https://example.com"), None);
/// ```
pub fn department_code(href: &str) -> Option<String> {
    code_pattern()
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|code| code.as_str().to_lowercase())
        .filter(|code| !code.is_empty())
}
