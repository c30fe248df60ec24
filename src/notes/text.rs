//! Plain-text helpers for note content and tag input

use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("static pattern"))
}

/// Replace every HTML tag with a space
pub fn strip_html(html: &str) -> String {
    tag_pattern().replace_all(html, " ").into_owned()
}

/// Split comma-separated tag input: trimmed, empties removed, first
/// occurrence kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    normalize_tags(input.split(','))
}

/// Trim and de-duplicate tags, preserving order
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Convert plain text line breaks into `<br>` for the note editor
pub fn text_to_html(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join("<br>")
}
