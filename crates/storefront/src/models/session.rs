//! Session keys for per-visitor screen state.
//!
//! Each screen keeps its interface state under its own key. Nothing here
//! outlives the session.

/// Session keys.
pub mod keys {
    /// Key for the catalog cart (`minimal_store_core::Cart`).
    pub const CART: &str = "cart";

    /// Key for the detail screen's gallery and quantity
    /// (`minimal_store_core::DetailState`).
    pub const PRODUCT_DETAIL: &str = "product_detail";

    /// Key for the checkout form and submission phase
    /// (`minimal_store_core::CheckoutFlow`).
    pub const CHECKOUT: &str = "checkout";
}
