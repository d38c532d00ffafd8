//! Shared test utilities for resolver E2E tests

use std::sync::Arc;

use envrepo::config::Limits;
use envrepo::resolver::fetcher::ReqwestFetcher;
use envrepo::resolver::{Resolver, RetryPolicy};

/// A resolver backed by a real HTTP client, pointed at a mock server, with
/// single-attempt probes so tests stay fast and deterministic.
pub fn test_resolver(limits: Limits) -> Resolver {
    let fetcher = Arc::new(ReqwestFetcher::new(limits.probe_timeout()));
    Resolver::new(fetcher, RetryPolicy::none(), limits)
}

pub fn limits_with_cap(cap: usize) -> Limits {
    Limits {
        max_versions_per_platform: cap,
        ..Limits::default()
    }
}

/// Builds a minimal listing page from a list of hrefs.
pub fn listing_page(hrefs: &[&str]) -> String {
    let anchors: Vec<String> = hrefs
        .iter()
        .map(|href| format!(r#"<a class="download" href="{href}">{href}</a>"#))
        .collect();
    format!(
        "<html><body><table>{}</table></body></html>",
        anchors.join("\n")
    )
}
