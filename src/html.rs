//! Minimal HTML link extraction
//!
//! The resolver only ever needs the `href` targets of anchor tags on a
//! version listing page, so a regex over the raw body is enough; no DOM is
//! built.

use std::sync::LazyLock;

use regex::Regex;

static HREF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href\s*=\s*["']([^"']+)["']"#).expect("valid href pattern"));

/// Extracts every `href` attribute value from an HTML body, in document order.
pub fn extract_hrefs(body: &str) -> Vec<String> {
    HREF_PATTERN
        .captures_iter(body)
        .map(|c| c[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_hrefs_returns_targets_in_document_order() {
        let body = r#"
            <html><body>
            <a class="download" href="/dl/go1.21.5.linux-amd64.tar.gz">go1.21.5</a>
            <a href='/dl/go1.21.5.windows-amd64.zip'>go1.21.5</a>
            <a href="/doc/install">Install</a>
            </body></html>
        "#;

        assert_eq!(
            extract_hrefs(body),
            vec![
                "/dl/go1.21.5.linux-amd64.tar.gz",
                "/dl/go1.21.5.windows-amd64.zip",
                "/doc/install",
            ]
        );
    }

    #[test]
    fn extract_hrefs_returns_empty_for_body_without_links() {
        assert!(extract_hrefs("<html><body>no links here</body></html>").is_empty());
    }
}
