//! Catalog screen: filtered product grid plus the slide-out cart panel.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use minimal_store_core::{Cart, Catalog, CategoryFilter, Product};

use super::cart::load_cart;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Category tab display data for templates.
#[derive(Clone)]
pub struct TabView {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

/// Cart panel display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<ProductView>,
    pub total: String,
    pub count: usize,
}

impl CartView {
    /// Resolve a session cart against the catalog.
    #[must_use]
    pub fn new(cart: &Cart, catalog: &Catalog) -> Self {
        let items: Vec<ProductView> = cart
            .lines(catalog)
            .into_iter()
            .map(ProductView::from)
            .collect();
        Self {
            count: items.len(),
            items,
            total: cart.total(catalog).to_string(),
        }
    }
}

/// Catalog query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub products: Vec<ProductView>,
    pub tabs: Vec<TabView>,
    pub filter: String,
    pub cart: CartView,
    pub cart_open: bool,
}

impl CatalogTemplate {
    /// Render the screen for `filter` with the given cart.
    #[must_use]
    pub fn new(state: &AppState, filter: CategoryFilter, cart: &Cart, cart_open: bool) -> Self {
        let catalog = state.catalog();
        Self {
            products: catalog
                .filter(filter)
                .into_iter()
                .map(ProductView::from)
                .collect(),
            tabs: Catalog::tabs()
                .into_iter()
                .map(|tab| TabView {
                    href: catalog_url(tab),
                    label: tab.label(),
                    active: tab == filter,
                })
                .collect(),
            filter: filter.to_string(),
            cart: CartView::new(cart, catalog),
            cart_open,
        }
    }
}

/// Parse an optional `category` tag; absent means all products.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for tags the catalog does not know.
pub fn parse_filter(tag: Option<&str>) -> Result<CategoryFilter> {
    Ok(tag.map(str::parse::<CategoryFilter>).transpose()?.unwrap_or_default())
}

/// URL of the catalog screen showing `filter`.
#[must_use]
pub fn catalog_url(filter: CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => "/".to_string(),
        CategoryFilter::Only(category) => format!("/?category={category}"),
    }
}

/// Display the catalog grid.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> Result<CatalogTemplate> {
    let filter = parse_filter(query.category.as_deref())?;
    let cart = load_cart(&session).await?;

    Ok(CatalogTemplate::new(&state, filter, &cart, false))
}
