//! Fixed-versions strategy E2E tests against a stub HTTP server

mod helper;

use indexmap::IndexMap;
use mockito::{Matcher, Server};

use envrepo::catalog::platform::PLATFORMS;
use envrepo::resolver::{AcquisitionStrategy, EnvironmentSpec};
use envrepo::store;
use helper::{limits_with_cap, test_resolver};

fn fixed_spec(name: &str, base: &str, versions: &[&str]) -> EnvironmentSpec {
    let url_templates: IndexMap<String, String> = PLATFORMS
        .iter()
        .map(|p| {
            (
                p.key.to_string(),
                format!("{base}/{}/{name}-{{version}}-bin.zip", p.key),
            )
        })
        .collect();
    EnvironmentSpec {
        name: name.to_string(),
        strategy: AcquisitionStrategy::FixedVersions {
            versions: versions.iter().map(|v| v.to_string()).collect(),
            url_templates,
        },
    }
}

#[tokio::test]
async fn only_live_versions_end_up_in_the_repository() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", Matcher::Regex(r"3\.9\.9".to_string()))
        .with_status(200)
        .expect(PLATFORMS.len())
        .create_async()
        .await;
    server
        .mock("HEAD", Matcher::Regex(r"3\.9\.5".to_string()))
        .with_status(404)
        .expect(PLATFORMS.len())
        .create_async()
        .await;

    let spec = fixed_spec("maven", &server.url(), &["3.9.9", "3.9.5"]);
    let repository = test_resolver(limits_with_cap(5)).resolve_all(&[spec]).await;

    let maven = &repository["maven"];
    for platform in PLATFORMS {
        let versions = maven.get(platform.key).unwrap();
        assert_eq!(
            versions.keys().collect::<Vec<_>>(),
            vec!["3.9.9"],
            "platform {}",
            platform.key
        );
        assert!(versions["3.9.9"].contains(platform.key));
    }
}

#[tokio::test]
async fn dead_environment_yields_all_platforms_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let spec = fixed_spec("maven", &server.url(), &["3.9.9"]);
    let repository = test_resolver(limits_with_cap(5)).resolve_all(&[spec]).await;

    assert_eq!(repository["maven"].total_versions(), 0);
    // The environment still appears in the output with every platform listed.
    for platform in PLATFORMS {
        assert!(repository["maven"].get(platform.key).unwrap().is_empty());
    }
}

#[tokio::test]
async fn resolved_repository_feeds_catalog_and_options_documents() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", Matcher::Any)
        .with_status(200)
        .create_async()
        .await;

    let spec = fixed_spec("maven", &server.url(), &["3.9.5", "3.9.9"]);
    let repository = test_resolver(limits_with_cap(5)).resolve_all(&[spec]).await;

    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("repository.json");
    let options_path = dir.path().join("config.json");
    std::fs::write(
        &options_path,
        serde_json::json!({
            "environments": [
                { "name": "maven", "args": [ { "name": "version" } ] }
            ]
        })
        .to_string(),
    )
    .unwrap();

    store::catalog::save_catalog(&catalog_path, &repository).unwrap();
    store::options::update_options_file(&options_path, &repository, 4).unwrap();

    let catalog: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&catalog_path).unwrap()).unwrap();
    assert!(catalog["maven"]["linux-x64"]["3.9.9"].is_string());

    let options: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&options_path).unwrap()).unwrap();
    let version_arg = &options["environments"][0]["args"][0];
    assert_eq!(version_arg["default"], "3.9.9");
    assert_eq!(version_arg["options"], serde_json::json!(["3.9.9", "3.9.5"]));
}
