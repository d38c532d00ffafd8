//! Candidate harvesting from scraped link lists
//!
//! Applies the version-extraction pattern to raw hrefs, ranks the captured
//! versions, and groups hrefs by version string. Multiple hrefs sharing one
//! version are retained as a group so platform matching can later pick the
//! right link per platform under a single version key.

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::version::rank::{RankKey, rank};

/// All harvested links for a single distinct version.
#[derive(Debug, Clone)]
pub struct VersionGroup {
    pub version: String,
    pub key: RankKey,
    pub hrefs: Vec<String>,
}

/// Extracts version groups from a list of raw hrefs.
///
/// At most `max_links` hrefs are considered, applied before grouping. The
/// pattern's first capture group is taken as the version, with `.`
/// separators trimmed from either end. Strings the ranker rejects are
/// discarded. Groups come back sorted descending by rank key, newest first.
pub fn harvest(hrefs: &[String], pattern: &Regex, max_links: usize) -> Vec<VersionGroup> {
    let mut groups: IndexMap<String, VersionGroup> = IndexMap::new();

    for href in hrefs.iter().take(max_links) {
        let Some(captures) = pattern.captures(href) else {
            continue;
        };
        let Some(raw) = captures.get(1) else {
            continue;
        };
        let version = raw.as_str().trim_matches('.').to_string();

        let Some(key) = rank(&version) else {
            debug!("discarding unrankable version {:?} from {}", version, href);
            continue;
        };

        groups
            .entry(version.clone())
            .or_insert_with(|| VersionGroup {
                version,
                key,
                hrefs: Vec::new(),
            })
            .hrefs
            .push(href.clone());
    }

    let mut groups: Vec<VersionGroup> = groups.into_values().collect();
    groups.sort_by(|a, b| b.key.cmp(&a.key));
    groups
}
