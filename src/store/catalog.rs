//! Resolved-repository document persistence
//!
//! The catalog document is keyed environment -> platform -> version -> URL
//! and fully rewritten on each run.

use std::path::Path;

use tracing::info;

use crate::resolver::types::ResolvedRepository;
use crate::store::StoreError;

/// Writes the resolved repository as pretty-printed JSON.
pub fn save_catalog(path: &Path, repository: &ResolvedRepository) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(repository)?;
    std::fs::write(path, json)?;
    info!("repository updated and saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::types::PlatformVersionMap;
    use indexmap::IndexMap;

    #[test]
    fn save_catalog_writes_nested_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repository.json");

        let mut versions = PlatformVersionMap::new();
        versions.insert_if_absent(
            "linux-x64",
            "3.9.9",
            "https://example.com/maven-3.9.9.tar.gz".into(),
            5,
        );
        let mut repository = IndexMap::new();
        repository.insert("maven".to_string(), versions);

        save_catalog(&path, &repository).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written["maven"]["linux-x64"]["3.9.9"],
            "https://example.com/maven-3.9.9.tar.gz"
        );
        // Platforms with no versions are still present in the document.
        assert!(written["maven"]["windows-x64"].as_object().unwrap().is_empty());
    }

    #[test]
    fn save_catalog_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repository.json");
        std::fs::write(&path, "{\"stale\": true}").unwrap();

        let repository = IndexMap::new();
        save_catalog(&path, &repository).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(written.as_object().unwrap().is_empty());
    }
}
