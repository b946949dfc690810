//! Integration test harness for the MINIMAL storefront.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`,
//! so no server or port is needed. A [`TestApp`] keeps a cookie jar and
//! replays it on every request the way a browser would.
//!
//! ```rust,ignore
//! let mut app = TestApp::new();
//! let resp = app.post_form("/cart/add", &[("product_id", "1")]).await;
//! assert_eq!(resp.location.as_deref(), Some("/"));
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use tower::ServiceExt;
use tower_sessions::cookie::{Cookie, CookieJar};

pub use minimal_store_storefront::middleware::session::SESSION_COOKIE_NAME as SESSION_COOKIE;
use minimal_store_storefront::{app, config::StoreConfig, state::AppState};

/// A fully-read response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub location: Option<String>,
    pub body: String,
}

/// In-process storefront with a cookie jar.
///
/// Clones share the same session store and start with the same cookies, which
/// lets a test fire overlapping requests as the same visitor.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    jar: CookieJar,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Storefront with default configuration and no checkout delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_checkout_delay(Duration::ZERO)
    }

    /// Storefront with the given simulated checkout delay.
    #[must_use]
    pub fn with_checkout_delay(delay: Duration) -> Self {
        Self::with_config(StoreConfig {
            checkout_delay: delay,
            static_dir: static_dir(),
            ..StoreConfig::default()
        })
    }

    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            router: app(AppState::new(config)),
            jar: CookieJar::new(),
        }
    }

    /// The session cookie value, once the server has issued one.
    #[must_use]
    pub fn session_cookie(&self) -> Option<&str> {
        self.jar.get(SESSION_COOKIE).map(Cookie::value)
    }

    /// Forget every cookie, as a new visitor would arrive without any.
    pub fn clear_cookies(&mut self) {
        self.jar = CookieJar::new();
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request("GET", uri)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("valid request");
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        let cookies: Vec<String> = self
            .jar
            .iter()
            .map(|cookie| cookie.stripped().to_string())
            .collect();
        if cookies.is_empty() {
            builder
        } else {
            builder.header(header::COOKIE, cookies.join("; "))
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        self.store_cookies(response.headers());

        let status = response.status();
        let headers = response.headers().clone();
        let location = headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Apply `Set-Cookie` headers; an expired cookie is dropped from the jar.
    fn store_cookies(&mut self, headers: &HeaderMap) {
        let parsed = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| Cookie::parse(v.to_owned()).ok());

        for cookie in parsed {
            if cookie.max_age().is_some_and(|age| age.is_zero()) {
                self.jar.remove(Cookie::new(cookie.name().to_owned(), ""));
            } else {
                self.jar.add(cookie);
            }
        }
    }
}

/// Static assets of the storefront crate, independent of the working directory.
#[must_use]
pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static")
}
