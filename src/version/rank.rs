//! Version ranking
//!
//! Turns a raw version string into an ordered key used for precedence
//! comparison. Strings that yield no numeric components are invalid and
//! discarded by callers.

use semver::Version;

/// Ordered comparison key derived from a version string.
///
/// Comparison is element-wise over the integer sequence; when one key is a
/// prefix of the other, the shorter key ranks lower (`Vec`'s lexicographic
/// `Ord` gives exactly this). Identical keys from different raw strings are
/// possible and both retained by callers; a key does not uniquely identify
/// a raw string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey(Vec<u64>);

impl RankKey {
    #[cfg(test)]
    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

/// Parses a raw version string into a ranking key.
///
/// Strict semver is tried first; on success the key is the release triple
/// only. Pre-release and build metadata are dropped, so `1.2.3-beta` and
/// `1.2.3` produce identical keys. That mirrors the catalog format this
/// tool feeds and is asserted by tests rather than changed; relative
/// ordering of a pre-release and its final release is therefore undefined.
///
/// Non-semver strings fall back to a left-to-right digit-run scan: `.`
/// closes the current run, a trailing run is captured, and every other
/// character is ignored (so `go1.21.5` yields `[1, 21, 5]`). Returns
/// `None` when no digit run is found.
pub fn rank(raw: &str) -> Option<RankKey> {
    if let Ok(version) = Version::parse(raw) {
        return Some(RankKey(vec![version.major, version.minor, version.patch]));
    }

    let mut components = Vec::new();
    let mut run = String::new();
    for c in raw.chars() {
        if c.is_ascii_digit() {
            run.push(c);
        } else if c == '.' && !run.is_empty() {
            if let Ok(n) = run.parse() {
                components.push(n);
            }
            run.clear();
        }
    }
    if !run.is_empty()
        && let Ok(n) = run.parse()
    {
        components.push(n);
    }

    if components.is_empty() {
        None
    } else {
        Some(RankKey(components))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3", &[1, 2, 3])]
    #[case("22.12.0", &[22, 12, 0])]
    // Partial versions take the fallback path.
    #[case("1.2", &[1, 2])]
    #[case("8", &[8])]
    // Non-digit prefixes are ignored by the digit-run scan.
    #[case("go1.21.5", &[1, 21, 5])]
    #[case("v3.9.9", &[3, 9, 9])]
    fn rank_extracts_numeric_components(#[case] raw: &str, #[case] expected: &[u64]) {
        assert_eq!(rank(raw).unwrap().components(), expected);
    }

    #[test]
    fn rank_returns_none_when_no_digits_present() {
        assert_eq!(rank("nightly"), None);
        assert_eq!(rank(""), None);
    }

    #[test]
    fn prerelease_ranks_equal_to_final_release() {
        // Known ambiguity: the key drops pre-release qualifiers, so a beta
        // and its final release are indistinguishable to the ranker.
        assert_eq!(rank("1.2.3-beta"), rank("1.2.3"));
    }

    #[rstest]
    #[case("1.2.4", "1.2.3")]
    #[case("2.0.0", "1.99.99")]
    #[case("10.0.0", "9.9.9")]
    // Equal common prefix: the longer key wins.
    #[case("1.2.0", "1.2")]
    #[case("go1.21.5", "go1.9.9")]
    fn rank_orders_higher_versions_above_lower(#[case] higher: &str, #[case] lower: &str) {
        assert!(rank(higher).unwrap() > rank(lower).unwrap());
    }

    #[test]
    fn descending_sort_puts_newest_first() {
        let mut versions = vec!["3.8.8", "3.9.9", "3.9.5"];
        versions.sort_by_key(|v| std::cmp::Reverse(rank(v).unwrap()));
        assert_eq!(versions, vec!["3.9.9", "3.9.5", "3.8.8"]);
    }
}
