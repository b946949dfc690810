//! Health check, static assets and response headers.

use axum::http::{StatusCode, header};
use minimal_store_integration_tests::TestApp;

#[tokio::test]
async fn test_health() {
    let mut app = TestApp::new();
    let resp = app.get("/health").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let mut app = TestApp::new();
    let resp = app.get("/wishlist").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pages_carry_security_headers() {
    let mut app = TestApp::new();
    let resp = app.get("/").await;

    let get = |name: &str| {
        resp.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    assert_eq!(get("x-frame-options"), "DENY");
    assert_eq!(get("x-content-type-options"), "nosniff");
    assert!(get("cache-control").starts_with("no-store"));
    assert!(get("content-security-policy").contains("form-action 'self'"));
}

#[tokio::test]
async fn test_static_assets_are_served_and_cacheable() {
    let mut app = TestApp::new();
    let resp = app.get("/static/images/placeholder.svg").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.starts_with("<svg"));
    assert!(resp.headers.get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let mut app = TestApp::new();
    let resp = app.get("/health").await;

    let id = resp
        .headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("request id header");
    assert_eq!(id.len(), 36);
}
