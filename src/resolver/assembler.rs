//! Repository assembly
//!
//! Orchestrates harvesting, platform matching and verification across the
//! configured environments and produces the resolved repository map.
//! Environments are processed independently; no failure inside one
//! environment escalates past it. Probes fan out concurrently with a
//! bounded in-flight count and their results are folded into the output
//! map by a single collector.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream;
use regex::Regex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::catalog::matcher::match_platform;
use crate::catalog::platform::PLATFORMS;
use crate::config::Limits;
use crate::html::extract_hrefs;
use crate::resolver::fetcher::{HttpFetcher, ReqwestFetcher};
use crate::resolver::spec::{AcquisitionStrategy, EnvironmentSpec, apply_template};
use crate::resolver::types::{PlatformVersionMap, ResolvedRepository};
use crate::resolver::verify::{RetryPolicy, Verifier, is_acceptable_file_type};
use crate::version::harvest::harvest;
use crate::version::rank::rank;

/// A candidate awaiting its liveness probe.
struct Probe {
    platform: &'static str,
    version: String,
    url: String,
}

/// Resolves download URLs for a set of environment specs.
pub struct Resolver {
    fetcher: Arc<dyn HttpFetcher>,
    verifier: Verifier,
    limits: Limits,
}

impl Resolver {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, retry: RetryPolicy, limits: Limits) -> Self {
        let verifier = Verifier::new(fetcher.clone(), retry);
        Self {
            fetcher,
            verifier,
            limits,
        }
    }

    /// A resolver backed by a real HTTP client, using the limits' probe
    /// timeout and the default retry policy.
    pub fn with_defaults(limits: Limits) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(limits.probe_timeout()));
        Self::new(fetcher, RetryPolicy::default(), limits)
    }

    /// Resolves every environment and returns the completed repository.
    /// One environment's total failure never blocks the others.
    pub async fn resolve_all(&self, specs: &[EnvironmentSpec]) -> ResolvedRepository {
        let mut repository = ResolvedRepository::new();
        for spec in specs {
            info!("resolving versions for {}", spec.name);
            let versions = self.resolve_environment(spec).await;
            log_summary(&spec.name, &versions);
            repository.insert(spec.name.clone(), versions);
        }
        repository
    }

    /// Resolves a single environment under the overall deadline. On expiry
    /// the environment yields an empty map; partial progress is dropped so
    /// re-runs stay deterministic.
    pub async fn resolve_environment(&self, spec: &EnvironmentSpec) -> PlatformVersionMap {
        match timeout(self.limits.environment_timeout(), self.resolve_strategy(spec)).await {
            Ok(versions) => versions,
            Err(_) => {
                warn!(
                    "resolution of {} exceeded {:?}, returning no versions",
                    spec.name,
                    self.limits.environment_timeout()
                );
                PlatformVersionMap::new()
            }
        }
    }

    async fn resolve_strategy(&self, spec: &EnvironmentSpec) -> PlatformVersionMap {
        match &spec.strategy {
            AcquisitionStrategy::FixedVersions {
                versions,
                url_templates,
            } => {
                self.resolve_fixed(&spec.name, versions, url_templates)
                    .await
            }
            AcquisitionStrategy::WebScrape {
                page_url,
                version_pattern,
                download_base,
            } => {
                self.resolve_scraped(&spec.name, page_url, version_pattern, download_base.as_deref())
                    .await
            }
        }
    }

    /// Fixed strategy: probe the cross-product of explicit versions and
    /// templated platforms, then fold verified results in catalog order and
    /// descending version order so the cap keeps the newest.
    async fn resolve_fixed(
        &self,
        name: &str,
        versions: &[String],
        url_templates: &indexmap::IndexMap<String, String>,
    ) -> PlatformVersionMap {
        let mut map = PlatformVersionMap::new();

        // Highest-ranked first; unrankable strings go last in input order.
        let mut ordered: Vec<&String> = versions.iter().collect();
        ordered.sort_by(|a, b| rank(b).cmp(&rank(a)));

        let mut probes = Vec::new();
        for platform in PLATFORMS {
            let Some(template) = url_templates.get(platform.key) else {
                warn!("{name} has no URL template for {}", platform.key);
                continue;
            };
            for version in &ordered {
                probes.push(Probe {
                    platform: platform.key,
                    version: (*version).clone(),
                    url: apply_template(template, version),
                });
            }
        }

        if probes.is_empty() {
            warn!("{name} has no versions to check");
            return map;
        }

        debug!("checking {} candidate URLs for {name}", probes.len());
        let live = self.probe_batch(&probes).await;
        for (probe, live) in probes.into_iter().zip(live) {
            if live {
                let added = map.insert_if_absent(
                    probe.platform,
                    &probe.version,
                    probe.url,
                    self.limits.max_versions_per_platform,
                );
                if added {
                    info!(
                        "found valid version: {name}, platform: {}, version: {}",
                        probe.platform, probe.version
                    );
                }
            } else {
                warn!(
                    "version check failed: {name}, platform: {}, version: {}",
                    probe.platform, probe.version
                );
            }
        }
        map
    }

    /// Scrape strategy: harvest version groups from the listing page, then
    /// walk them newest first, probing one candidate per uncovered platform
    /// and stopping once every platform is at its cap.
    async fn resolve_scraped(
        &self,
        name: &str,
        page_url: &str,
        version_pattern: &str,
        download_base: Option<&str>,
    ) -> PlatformVersionMap {
        let mut map = PlatformVersionMap::new();
        let cap = self.limits.max_versions_per_platform;

        let pattern = match Regex::new(version_pattern) {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!("{name} has an invalid version pattern: {e}");
                return map;
            }
        };

        let body = match self.fetcher.get_text(page_url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("failed to fetch listing page for {name}: {page_url}: {e}");
                return map;
            }
        };

        let hrefs = extract_hrefs(&body);
        debug!("found {} links on {page_url}", hrefs.len());

        let groups = harvest(&hrefs, &pattern, self.limits.max_links_to_process);
        if groups.is_empty() {
            warn!("{name}: no versions found on {page_url}");
            return map;
        }
        info!("{name}: found {} distinct versions", groups.len());

        for group in groups {
            if map.all_at_cap(cap) {
                break;
            }

            // One candidate per platform still missing this version.
            let mut probes: Vec<Probe> = Vec::new();
            for href in &group.hrefs {
                let Some(platform) = match_platform(href) else {
                    continue;
                };
                if map.contains(platform.key, &group.version)
                    || map.at_cap(platform.key, cap)
                    || probes.iter().any(|p| p.platform == platform.key)
                {
                    continue;
                }
                let url = resolve_url(page_url, download_base, href);
                if !is_acceptable_file_type(&url, platform) {
                    debug!("unacceptable file type for {}: {url}", platform.key);
                    continue;
                }
                probes.push(Probe {
                    platform: platform.key,
                    version: group.version.clone(),
                    url,
                });
            }

            if probes.is_empty() {
                continue;
            }

            let live = self.probe_batch(&probes).await;
            for (probe, live) in probes.into_iter().zip(live) {
                if live && map.insert_if_absent(probe.platform, &probe.version, probe.url.clone(), cap)
                {
                    info!(
                        "found {name} {} for {}: {}",
                        probe.version, probe.platform, probe.url
                    );
                }
            }
        }

        map
    }

    /// Verifies a batch of candidates concurrently, bounded by the
    /// configured in-flight probe limit. Results come back aligned with the
    /// input order regardless of completion order.
    async fn probe_batch(&self, probes: &[Probe]) -> Vec<bool> {
        let verifier = &self.verifier;
        let results = stream::iter(probes.iter().enumerate().map(|(index, probe)| async move {
            (index, verifier.verify_live(&probe.url).await)
        }))
        .buffer_unordered(self.limits.max_concurrent_probes)
        .collect::<Vec<(usize, bool)>>()
        .await;

        let mut live = vec![false; probes.len()];
        for (index, ok) in results {
            live[index] = ok;
        }
        live
    }
}

/// Builds the final download URL for a scraped href.
///
/// Absolute hrefs pass through; relative hrefs are prefixed with the
/// configured download base, or with the listing page URL when no base is
/// set.
fn resolve_url(page_url: &str, download_base: Option<&str>, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if let Some(base) = download_base {
        format!("{base}{href}")
    } else {
        format!("{page_url}{href}")
    }
}

fn log_summary(name: &str, versions: &PlatformVersionMap) {
    for (platform, platform_versions) in versions.iter() {
        if platform_versions.is_empty() {
            warn!("[{name}] platform {platform} has no versions");
            continue;
        }
        info!(
            "[{name}] platform {platform} has {} versions",
            platform_versions.len()
        );
        if let Some(latest) = platform_versions
            .keys()
            .max_by_key(|v| rank(v.trim_start_matches('v')))
        {
            info!("[{name}] platform {platform} latest version: {latest}");
        }
    }
    info!(
        "[{name}] found {} versions in total",
        versions.total_versions()
    );
}
