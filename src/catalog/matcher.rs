//! Maps a download link to the platform it targets
//!
//! Two independent heuristics are exposed separately because harvesting
//! applies them in a fixed fallback order: identifier tokens first, alias
//! tokens second. A link that matches neither is simply irrelevant to the
//! catalog, not an error.

use crate::catalog::platform::{ARCH_IDENTIFIERS, OS_IDENTIFIERS, PLATFORMS, Platform, find};

/// Matches a link against the OS/architecture identifier tables.
///
/// The first OS whose token substring-matches the lowercased link decides
/// the OS; links with no architecture token default to `x64`. Returns the
/// platform only if the detected combination exists in the catalog.
pub fn match_by_identifiers(href: &str) -> Option<&'static Platform> {
    let href = href.to_lowercase();

    let os = OS_IDENTIFIERS
        .iter()
        .find(|(_, tokens)| tokens.iter().any(|t| href.contains(t)))
        .map(|(os, _)| *os)?;

    let arch = ARCH_IDENTIFIERS
        .iter()
        .find(|(_, tokens)| tokens.iter().any(|t| href.contains(t)))
        .map(|(arch, _)| *arch)
        .unwrap_or("x64");

    find(&format!("{os}-{arch}"))
}

/// Matches a link against platform alias tokens, in catalog priority order.
///
/// Aliases overlap between platforms (e.g. "amd64"); the earliest platform
/// in the catalog wins.
pub fn match_by_alias(href: &str) -> Option<&'static Platform> {
    let href = href.to_lowercase();
    PLATFORMS
        .iter()
        .find(|p| p.aliases.iter().any(|a| href.contains(a)))
}

/// Matches a link using identifier tokens first, falling back to aliases.
pub fn match_platform(href: &str) -> Option<&'static Platform> {
    match_by_identifiers(href).or_else(|| match_by_alias(href))
}
