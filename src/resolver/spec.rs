//! Environment definitions and acquisition strategies
//!
//! An environment spec names a tool and says how its candidate versions are
//! obtained: either an explicit version list with per-platform URL
//! templates, or a listing page to scrape. Spec files use the same JSON
//! shape as the embedded defaults: a map of environment name to strategy,
//! tagged by `"type"`.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::resolver::error::SpecError;

/// A named tool whose download URLs should be resolved.
#[derive(Debug, Clone)]
pub struct EnvironmentSpec {
    pub name: String,
    pub strategy: AcquisitionStrategy,
}

/// How candidate versions for an environment are obtained.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcquisitionStrategy {
    /// Explicit versions, with one URL template per platform. Templates
    /// contain a `{version}` placeholder; every occurrence is substituted.
    FixedVersions {
        versions: Vec<String>,
        #[serde(rename = "url_template")]
        url_templates: IndexMap<String, String>,
    },
    /// A listing page scraped for candidate links.
    WebScrape {
        #[serde(rename = "url")]
        page_url: String,
        /// Regex whose first capture group extracts a version from a href.
        version_pattern: String,
        /// Base prepended to relative hrefs instead of the page URL.
        #[serde(default)]
        download_base: Option<String>,
    },
}

/// Substitutes every `{version}` placeholder in a URL template.
pub fn apply_template(template: &str, version: &str) -> String {
    template.replace("{version}", version)
}

fn specs_from_map(map: IndexMap<String, AcquisitionStrategy>) -> Vec<EnvironmentSpec> {
    map.into_iter()
        .map(|(name, strategy)| EnvironmentSpec { name, strategy })
        .collect()
}

/// The built-in environment set (java, node, go, maven, gradle).
pub fn default_specs() -> Vec<EnvironmentSpec> {
    const EMBEDDED: &str = include_str!("../../config/environments.json");
    let map: IndexMap<String, AcquisitionStrategy> =
        serde_json::from_str(EMBEDDED).expect("embedded environment config is valid");
    specs_from_map(map)
}

/// Loads environment specs from a JSON file with the same shape as the
/// embedded defaults.
pub fn load_specs(path: &Path) -> Result<Vec<EnvironmentSpec>, SpecError> {
    let content = std::fs::read_to_string(path)?;
    let map: IndexMap<String, AcquisitionStrategy> = serde_json::from_str(&content)?;
    Ok(specs_from_map(map))
}
