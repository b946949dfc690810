//! Cart route handlers.
//!
//! The cart lives in the visitor session as a list of product IDs. Mutations
//! follow post/redirect/get so a refresh never repeats them.

use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use minimal_store_core::{Cart, CategoryFilter, ProductId};

use super::catalog::{CatalogTemplate, catalog_url, parse_filter};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, empty if none was stored yet.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the cart in the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    /// Active catalog filter to return to.
    pub category: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Display the catalog with the cart panel open.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CatalogTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CatalogTemplate::new(&state, CategoryFilter::All, &cart, true))
}

/// Append a product to the cart.
///
/// No dedup and no stock check: adding the same product twice gives two
/// entries.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let filter = parse_filter(form.category.as_deref())?;
    let product = state
        .catalog()
        .get(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut cart = load_cart(&session).await?;
    cart.add(product);
    save_cart(&session, &cart).await?;

    tracing::info!(product_id = %product.id, cart_len = cart.len(), "Added to cart");
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", &product.id.to_string())]),
    );

    Ok(Redirect::to(&catalog_url(filter)))
}

/// Remove one entry for a product from the cart.
///
/// Removing a product that is not in the cart is a no-op.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;

    if cart.remove(form.product_id) {
        save_cart(&session, &cart).await?;
        tracing::info!(product_id = %form.product_id, cart_len = cart.len(), "Removed from cart");
        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", &form.product_id.to_string())]),
        );
    } else {
        tracing::debug!(product_id = %form.product_id, "Product not in cart");
    }

    Ok(Redirect::to("/cart"))
}
