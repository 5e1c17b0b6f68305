//! End-to-end resolution against route files on disk.

use layout_service::config::{FallbackLanguage, LayoutConfig};
use layout_service::layout::{LayoutResolver, Resolution};
use serde_json::Value;

mod common;

fn layout_config(dir: &std::path::Path) -> LayoutConfig {
    LayoutConfig {
        data_dir: dir.to_string_lossy().into_owned(),
        ..LayoutConfig::default()
    }
}

fn route_name(doc: &layout_service::LayoutDocument) -> Option<String> {
    doc.route()
        .and_then(|r| r["name"].as_str())
        .map(str::to_string)
}

#[tokio::test]
async fn test_existing_page_returns_stored_document() {
    let dir = common::sample_routes();
    let resolver = LayoutResolver::from_config(&layout_config(dir.path()));

    let doc = resolver.resolve("/about", Some("en")).await;

    let stored: Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("about-en.json")).unwrap()).unwrap();
    assert_eq!(serde_json::to_value(&doc).unwrap(), stored);
}

#[tokio::test]
async fn test_stored_document_passes_through_unchanged() {
    let dir = common::sample_routes();
    let sparse = serde_json::json!({
        "sitecore": {
            "context": {
                "site": { "name": "website", "hostName": "example.com", "rootPath": "/sitecore/content" },
                "itemPath": "/teaser"
            }
        },
        "exportedAt": "2024-05-01T12:00:00Z"
    });
    common::write_route(dir.path(), "teaser-en", &sparse);
    let resolver = LayoutResolver::from_config(&layout_config(dir.path()));

    let resolved = resolver.resolve_detailed("/teaser", Some("en")).await;
    assert_eq!(resolved.resolution.as_str(), "route");
    assert_eq!(serde_json::to_value(&resolved.document).unwrap(), sparse);
}

#[tokio::test]
async fn test_unicode_and_spaced_paths_resolve() {
    let dir = common::sample_routes();
    common::write_route(dir.path(), "über-uns-de", &common::route_document("über-uns", "de"));
    common::write_route(dir.path(), "about us-de", &common::route_document("about us", "de"));
    let resolver = LayoutResolver::from_config(&layout_config(dir.path()));

    let resolved = resolver.resolve_detailed("/Über-Uns", Some("de")).await;
    assert_eq!(resolved.resolution.as_str(), "route");
    assert_eq!(route_name(&resolved.document).as_deref(), Some("über-uns"));

    let resolved = resolver.resolve_detailed("/About Us", Some("de")).await;
    assert_eq!(resolved.resolution.as_str(), "route");
    assert_eq!(route_name(&resolved.document).as_deref(), Some("about us"));
}

#[tokio::test]
async fn test_unknown_page_returns_default_document() {
    let dir = common::sample_routes();
    let resolver = LayoutResolver::from_config(&layout_config(dir.path()));

    let resolved = resolver.resolve_detailed("/unknown-page", Some("en")).await;
    assert_eq!(route_name(&resolved.document).as_deref(), Some("home"));
    assert!(matches!(resolved.resolution, Resolution::Fallback { .. }));
}

#[tokio::test]
async fn test_home_page_per_language() {
    let dir = common::sample_routes();
    let resolver = LayoutResolver::from_config(&layout_config(dir.path()));

    assert_eq!(route_name(&resolver.resolve("/", None).await).as_deref(), Some("home"));
    assert_eq!(route_name(&resolver.resolve("", Some("en")).await).as_deref(), Some("home"));
    assert_eq!(
        route_name(&resolver.resolve("/", Some("da")).await).as_deref(),
        Some("forside")
    );
}

#[tokio::test]
async fn test_static_asset_is_rejected() {
    let dir = common::sample_routes();
    let resolver = LayoutResolver::from_config(&layout_config(dir.path()));

    let resolved = resolver.resolve_detailed("/_next/static/chunk.js", None).await;
    assert_eq!(resolved.resolution, Resolution::StaticAsset);
    assert!(resolved.document.is_not_found());
}

#[tokio::test]
async fn test_empty_store_synthesizes_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = LayoutConfig {
        site_name: "corporate".into(),
        ..layout_config(dir.path())
    };
    let resolver = LayoutResolver::from_config(&config);

    let resolved = resolver.resolve_detailed("/about", Some("fr")).await;
    assert_eq!(resolved.resolution, Resolution::NotFound);
    assert_eq!(
        serde_json::to_value(&resolved.document).unwrap(),
        serde_json::json!({
            "sitecore": {
                "context": {
                    "pageEditing": false,
                    "site": { "name": "corporate" },
                    "language": "fr"
                },
                "route": null
            }
        })
    );
}

#[tokio::test]
async fn test_traversal_never_leaves_data_dir() {
    let outer = tempfile::tempdir().unwrap();
    let data = outer.path().join("routes");
    std::fs::create_dir(&data).unwrap();
    common::write_route(&data, "en", &common::route_document("home", "en"));
    // A file one level up that a naive path join could reach.
    common::write_route(outer.path(), "secret-en", &common::route_document("secret", "en"));

    let resolver = LayoutResolver::from_config(&layout_config(&data));

    for path in ["/../secret", "/..%2fsecret", "/..\\secret"] {
        let doc = resolver.resolve(path, Some("en")).await;
        assert_eq!(route_name(&doc).as_deref(), Some("home"), "{path}");
    }
}

#[tokio::test]
async fn test_malformed_artifact_falls_back() {
    let dir = common::sample_routes();
    std::fs::write(dir.path().join("broken-en.json"), "{").unwrap();
    let resolver = LayoutResolver::from_config(&layout_config(dir.path()));

    let resolved = resolver.resolve_detailed("/broken", None).await;
    assert_eq!(route_name(&resolved.document).as_deref(), Some("home"));
}

#[tokio::test]
async fn test_requested_language_fallback_policy() {
    let dir = common::sample_routes();
    let config = LayoutConfig {
        fallback_language: FallbackLanguage::Requested,
        ..layout_config(dir.path())
    };
    let resolver = LayoutResolver::from_config(&config);

    let doc = resolver.resolve("/contact", Some("da")).await;
    assert_eq!(route_name(&doc).as_deref(), Some("forside"));

    let default_policy = LayoutResolver::from_config(&layout_config(dir.path()));
    let doc = default_policy.resolve("/contact", Some("da")).await;
    assert_eq!(route_name(&doc).as_deref(), Some("home"));
}
