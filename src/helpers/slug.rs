//! Slug generation

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-+").unwrap();
}

/// Derive a URL-safe slug from a title
///
/// Lowercases, drops everything except ASCII letters, digits, whitespace and
/// hyphens, turns whitespace runs into single hyphens, collapses repeated
/// hyphens and trims hyphens from both ends.
///
/// # Examples
/// ```
/// use memorial_cms::helpers::generate_slug;
/// assert_eq!(generate_slug("Hello, World!!"), "hello-world");
/// ```
pub fn generate_slug(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}
