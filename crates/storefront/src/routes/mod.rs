//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Health check
//!
//! # Catalog
//! GET  /?category=<all|home|...>     - Product grid with cart panel collapsed
//! GET  /cart                         - Product grid with cart panel open
//! POST /cart/add                     - Append a product, back to the grid
//! POST /cart/remove                  - Remove one entry, back to the cart
//!
//! # Product detail
//! GET  /products/{id}                - Detail page
//! POST /products/{id}/quantity       - Increase or decrease quantity
//! POST /products/{id}/image          - Select gallery image
//! POST /products/{id}/buy-now        - Buy Now (notice only)
//!
//! # Checkout
//! GET  /checkout                     - Shipping details form
//! POST /checkout                     - Simulated submission, then redirect
//! GET  /thank-you                    - Confirmation page
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the product detail routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/quantity", post(products::quantity))
        .route("/{id}/image", post(products::image))
        .route("/{id}/buy-now", post(products::buy_now))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .nest("/cart", cart_routes())
        .nest("/products", product_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .route("/thank-you", get(checkout::thank_you))
}
