//! Checkout form and simulated submission.

use std::time::Duration;

use axum::http::StatusCode;
use minimal_store_integration_tests::TestApp;

const VALID_FIELDS: [(&str, &str); 9] = [
    ("firstName", "Ada"),
    ("lastName", "Lovelace"),
    ("email", "ada@example.com"),
    ("phone", "+44 20 7946 0000"),
    ("address", "12 St James's Square"),
    ("city", "London"),
    ("postalCode", "SW1Y 4JH"),
    ("country", "UK"),
    ("shippingMethod", "express"),
];

#[tokio::test]
async fn test_checkout_form_defaults() {
    let mut app = TestApp::new();
    let resp = app.get("/checkout").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Proceed to Payment"));
    assert!(!resp.body.contains("Processing..."));
    assert!(resp.body.contains(r#"<option value="US" selected>United States</option>"#));
    assert!(resp.body.contains(r#"value="standard" checked"#));
    assert!(resp.body.contains("$5.00"));
    assert!(resp.body.contains("$15.00"));
    assert!(resp.body.contains(r#"href="/cart""#));
}

#[tokio::test]
async fn test_checkout_missing_field_keeps_draft() {
    let mut app = TestApp::new();
    let resp = app
        .post_form("/checkout", &[("firstName", "Ada"), ("country", "CA")])
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("lastName is required"));
    assert!(resp.body.contains("Proceed to Payment"));

    let resp = app.get("/checkout").await;
    assert!(resp.body.contains(r#"value="Ada""#));
    assert!(resp.body.contains(r#"<option value="CA" selected>Canada</option>"#));
}

#[tokio::test]
async fn test_checkout_rejects_invalid_email() {
    let mut app = TestApp::new();
    let mut fields = VALID_FIELDS;
    fields[2] = ("email", "ada.example.com");

    let resp = app.post_form("/checkout", &fields).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("invalid email address"));
}

#[tokio::test]
async fn test_checkout_rejects_unknown_choices() {
    let mut app = TestApp::new();

    let resp = app.post_form("/checkout", &[("country", "FR")]).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app
        .post_form("/checkout", &[("shippingMethod", "overnight")])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app.post_form("/checkout", &[("coupon", "FREE")]).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_submit_redirects_to_confirmation() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", &[("product_id", "2")]).await;

    let resp = app.post_form("/checkout", &VALID_FIELDS).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/thank-you"));

    let resp = app.get("/thank-you").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Thank you"));

    // The form starts over; the cart is left alone
    let resp = app.get("/checkout").await;
    assert!(resp.body.contains("Proceed to Payment"));
    assert!(!resp.body.contains(r#"value="Ada""#));

    let resp = app.get("/cart").await;
    assert!(resp.body.contains(r#"id="cart-total">$45.00</span>"#));
}

#[tokio::test(start_paused = true)]
async fn test_checkout_submit_waits_for_delay() {
    let mut app = TestApp::with_checkout_delay(Duration::from_millis(1500));
    let started = tokio::time::Instant::now();

    let resp = app.post_form("/checkout", &VALID_FIELDS).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(started.elapsed() >= Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn test_checkout_disabled_while_submitting() {
    let mut app = TestApp::with_checkout_delay(Duration::from_millis(1500));
    // Establish the session before the two overlapping requests
    app.post_form("/cart/add", &[("product_id", "1")]).await;

    let mut first = app.clone();
    let pending = tokio::spawn(async move { first.post_form("/checkout", &VALID_FIELDS).await });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let page = app.get("/checkout").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Processing..."));
    assert!(page.body.contains("disabled"));
    assert!(!page.body.contains("Proceed to Payment"));

    let resp = app.post_form("/checkout", &VALID_FIELDS).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert!(resp.body.contains("Processing..."));

    let resp = pending.await.expect("submission task");
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/thank-you"));

    let page = app.get("/checkout").await;
    assert!(page.body.contains("Proceed to Payment"));
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_submission_still_finishes() {
    let mut app = TestApp::with_checkout_delay(Duration::from_millis(1500));
    app.post_form("/cart/add", &[("product_id", "1")]).await;

    // The visitor goes away while the submission is still running
    let abandoned = tokio::time::timeout(
        Duration::from_millis(100),
        app.post_form("/checkout", &VALID_FIELDS),
    )
    .await;
    assert!(abandoned.is_err());

    let page = app.get("/checkout").await;
    assert!(page.body.contains("Processing..."));

    tokio::time::sleep(Duration::from_secs(3600)).await;

    let page = app.get("/checkout").await;
    assert!(page.body.contains("Proceed to Payment"));
    assert!(!page.body.contains("Processing..."));

    let resp = app.post_form("/checkout", &VALID_FIELDS).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/thank-you"));
}
