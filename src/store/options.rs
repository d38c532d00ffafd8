//! Default-configuration options update
//!
//! After a resolution run, each environment entry in the default-config
//! document gets its `version` argument refreshed: `options` becomes the
//! top-K resolved versions (newest first) and `default` the newest. The
//! document shape is `{ "environments": [ { "name", "args": [ { "name",
//! "options", "default" } ] } ] }`.

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::resolver::types::{PlatformVersionMap, ResolvedRepository};
use crate::store::StoreError;
use crate::version::rank::rank;

/// The top-K versions for an environment, newest first.
///
/// Versions come from the first platform map in catalog priority order,
/// matching the original catalog tooling; a leading `v` is ignored for
/// ranking purposes.
pub fn top_versions(versions: &PlatformVersionMap, k: usize) -> Vec<String> {
    let Some(first_platform) = versions.first_platform() else {
        return Vec::new();
    };
    let mut sorted: Vec<String> = first_platform.keys().cloned().collect();
    sorted.sort_by(|a, b| {
        rank(b.trim_start_matches('v')).cmp(&rank(a.trim_start_matches('v')))
    });
    sorted.truncate(k);
    sorted
}

/// Refreshes the `version` argument of each environment entry in a
/// default-config document. Environments absent from the document or with
/// no resolved versions are left untouched.
pub fn update_default_options(config: &mut Value, repository: &ResolvedRepository, k: usize) {
    let Some(environments) = config
        .get_mut("environments")
        .and_then(Value::as_array_mut)
    else {
        warn!("default config has no environments list, nothing to update");
        return;
    };

    for entry in environments {
        let Some(name) = entry.get("name").and_then(Value::as_str).map(String::from) else {
            continue;
        };
        let Some(versions) = repository.get(&name) else {
            continue;
        };
        let options = top_versions(versions, k);
        if options.is_empty() {
            continue;
        }

        let Some(args) = entry.get_mut("args").and_then(Value::as_array_mut) else {
            continue;
        };
        for arg in args {
            if arg.get("name").and_then(Value::as_str) == Some("version") {
                arg["default"] = Value::String(options[0].clone());
                arg["options"] = Value::Array(
                    options.iter().cloned().map(Value::String).collect(),
                );
            }
        }
    }
}

/// Applies [`update_default_options`] to a config file on disk. A missing
/// file is not an error; there is simply nothing to update.
pub fn update_options_file(
    path: &Path,
    repository: &ResolvedRepository,
    k: usize,
) -> Result<(), StoreError> {
    if !path.exists() {
        warn!("default config {} does not exist, skipping", path.display());
        return Ok(());
    }

    let mut config: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    update_default_options(&mut config, repository, k);
    std::fs::write(path, serde_json::to_string_pretty(&config)?)?;
    info!("default config updated and saved to {}", path.display());
    Ok(())
}
