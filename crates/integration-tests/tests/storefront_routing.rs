//! Integration tests for storefront routing.
//!
//! These tests require:
//! - A running `PostgreSQL` database with the schema applied (`ms-cli migrate run`)
//! - The storefront server running (cargo run -p multishop-storefront)
//!
//! Run with: cargo test -p multishop-integration-tests -- --ignored

use multishop_integration_tests::storefront_base_url;
use reqwest::{Client, StatusCode};
use serde_json::Value;

fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_request_id_is_echoed() {
    let resp = client()
        .get(format!("{}/health", storefront_base_url()))
        .header("x-request-id", "integration-test-1")
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(
        resp.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("integration-test-1")
    );
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_unknown_slug_is_json_404() {
    let resp = client()
        .get(format!(
            "{}/no-such-page-integration-test",
            storefront_base_url()
        ))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Body is not JSON");
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_blog_post_requires_slug() {
    let resp = client()
        .get(format!("{}/blog.php", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_sitemap_is_xml() {
    let base_url = storefront_base_url();
    for path in ["/sitemap.xml", "/sitemap.php"] {
        let resp = client()
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to reach storefront");

        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(content_type.starts_with("application/xml"), "{path}");

        let body = resp.text().await.expect("Failed to read body");
        assert!(body.contains("<urlset"));
        assert!(body.contains("<loc>"));
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_site_api() {
    let resp = client()
        .get(format!("{}/api/site", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Body is not JSON");
    assert!(body["name"].is_string());
    assert!(body["header_menu"].is_array());
    assert!(body["footer_menu"].is_array());
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_trailing_slash_is_trimmed() {
    let resp = client()
        .get(format!("{}/blog/", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
}
