//! Application state shared across handlers.

use std::sync::Arc;

use minimal_store_core::{Catalog, ProductDetail};

use crate::config::StoreConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds only immutable data; everything a
/// visitor changes lives in their session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StoreConfig,
    catalog: Catalog,
    featured: ProductDetail,
}

impl AppState {
    /// Create application state with the built-in catalog.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self::with_catalog(config, Catalog::seeded())
    }

    /// Create application state around an explicit catalog.
    #[must_use]
    pub fn with_catalog(config: StoreConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                featured: ProductDetail::featured(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The product shown on the detail screen.
    #[must_use]
    pub fn featured(&self) -> &ProductDetail {
        &self.inner.featured
    }
}
