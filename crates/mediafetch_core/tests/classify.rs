use mediafetch_core::{classify, InputKind};

#[test]
fn absolute_http_urls_are_direct() {
    for raw in [
        "https://x.com/v/1",
        "http://example.com",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
        "HTTPS://EXAMPLE.COM/A",
    ] {
        assert_eq!(classify(raw), InputKind::DirectUrl, "{raw}");
    }
}

#[test]
fn everything_else_is_a_search_query() {
    for raw in [
        "lofi beats",
        "x.com/v/1",
        "ftp://example.com/file",
        "https://",
        "https://example.com/a b",
        "see https://example.com",
        "https://example.com/\"quoted\"",
    ] {
        assert_eq!(classify(raw), InputKind::SearchQuery, "{raw}");
    }
}
