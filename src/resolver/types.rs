//! Output types of a resolution run

use indexmap::IndexMap;
use serde::Serialize;

use crate::catalog::platform::PLATFORMS;

/// Verified versions for one platform: version string -> download URL.
pub type VersionMap = IndexMap<String, String>;

/// Per-platform version maps for one environment.
///
/// Every catalog platform is present from construction, possibly with an
/// empty map, so the serialized document always lists all platforms.
/// Insertion is insert-if-absent with a cap; concurrent probe results are
/// folded in by a single collector, never written from parallel tasks.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct PlatformVersionMap {
    platforms: IndexMap<String, VersionMap>,
}

impl PlatformVersionMap {
    /// An empty map seeded with every catalog platform, in priority order.
    pub fn new() -> Self {
        Self {
            platforms: PLATFORMS
                .iter()
                .map(|p| (p.key.to_string(), VersionMap::new()))
                .collect(),
        }
    }

    /// Records a verified URL unless the version is already present or the
    /// platform is at its cap. Returns whether the entry was added.
    pub fn insert_if_absent(
        &mut self,
        platform: &str,
        version: &str,
        url: String,
        cap: usize,
    ) -> bool {
        let Some(versions) = self.platforms.get_mut(platform) else {
            return false;
        };
        if versions.len() >= cap || versions.contains_key(version) {
            return false;
        }
        versions.insert(version.to_string(), url);
        true
    }

    pub fn contains(&self, platform: &str, version: &str) -> bool {
        self.platforms
            .get(platform)
            .is_some_and(|v| v.contains_key(version))
    }

    pub fn at_cap(&self, platform: &str, cap: usize) -> bool {
        self.platforms.get(platform).is_some_and(|v| v.len() >= cap)
    }

    pub fn all_at_cap(&self, cap: usize) -> bool {
        self.platforms.values().all(|v| v.len() >= cap)
    }

    pub fn get(&self, platform: &str) -> Option<&VersionMap> {
        self.platforms.get(platform)
    }

    /// Platforms in catalog priority order with their version maps.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &VersionMap)> {
        self.platforms.iter()
    }

    /// The first platform's version map, in catalog priority order. The
    /// derived options list is computed from this map, as the original
    /// catalog tooling did.
    pub fn first_platform(&self) -> Option<&VersionMap> {
        self.platforms.values().next()
    }

    pub fn total_versions(&self) -> usize {
        self.platforms.values().map(|v| v.len()).sum()
    }
}

impl Default for PlatformVersionMap {
    fn default() -> Self {
        Self::new()
    }
}

/// The engine's sole output: environment name -> platform -> version -> URL.
/// Fully rebuilt on each run; there is no incremental merge with prior state.
pub type ResolvedRepository = IndexMap<String, PlatformVersionMap>;
