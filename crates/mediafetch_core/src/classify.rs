use std::sync::LazyLock;

use regex::Regex;

/// Absolute http(s) URL: scheme followed by a body without whitespace or quotes.
static ABSOLUTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^https?://[^\s"']+$"#).expect("absolute url pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    DirectUrl,
    SearchQuery,
}

/// Decides whether already-trimmed, non-empty input names a resource or is a search phrase.
pub fn classify(raw: &str) -> InputKind {
    if ABSOLUTE_URL.is_match(raw) {
        InputKind::DirectUrl
    } else {
        InputKind::SearchQuery
    }
}
