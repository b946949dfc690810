//! Product detail route handlers.
//!
//! The detail screen always renders the featured product. The `{id}` path
//! segment must be a product ID but is not used to pick what is shown.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use minimal_store_core::{DetailState, ProductDetail, ProductId, ShippingMethod};

use crate::error::Result;
use crate::filters;
use crate::models::session_keys;
use crate::state::AppState;

/// Notice shown after Buy Now.
pub const BUY_NOW_NOTICE: &str = "Proceeding to checkout...";

/// Gallery thumbnail display data for templates.
#[derive(Clone)]
pub struct GalleryImageView {
    pub index: usize,
    pub url: String,
    pub selected: bool,
}

/// Shipping select option display data for templates.
#[derive(Clone)]
pub struct ShippingOptionView {
    pub value: &'static str,
    pub label: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub description: String,
    pub details: Vec<String>,
    pub main_image: String,
    pub selected_image: usize,
    pub gallery: Vec<GalleryImageView>,
    pub quantity: u32,
    pub shipping_options: Vec<ShippingOptionView>,
    pub notice: Option<String>,
}

impl ProductShowTemplate {
    #[must_use]
    pub fn new(
        id: ProductId,
        product: &ProductDetail,
        detail: DetailState,
        notice: Option<String>,
    ) -> Self {
        Self {
            id,
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            details: product.details.clone(),
            main_image: product
                .image(detail.selected_image)
                .unwrap_or_default()
                .to_string(),
            selected_image: detail.selected_image,
            gallery: product
                .images
                .iter()
                .enumerate()
                .map(|(index, url)| GalleryImageView {
                    index,
                    url: url.clone(),
                    selected: index == detail.selected_image,
                })
                .collect(),
            quantity: detail.quantity.get(),
            shipping_options: ShippingMethod::ALL
                .into_iter()
                .map(|method| ShippingOptionView {
                    value: method.as_str(),
                    label: format!("{} ({})", method.label(), method.estimate()),
                })
                .collect(),
            notice,
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

async fn load_detail(session: &Session) -> Result<DetailState> {
    Ok(session
        .get::<DetailState>(session_keys::PRODUCT_DETAIL)
        .await?
        .unwrap_or_default())
}

async fn save_detail(session: &Session, detail: DetailState) -> Result<()> {
    session.insert(session_keys::PRODUCT_DETAIL, detail).await?;
    Ok(())
}

fn detail_url(id: ProductId) -> String {
    format!("/products/{id}")
}

/// Quantity stepper direction.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityAction {
    Increase,
    Decrease,
}

/// Quantity form data.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub action: QuantityAction,
}

/// Gallery selection form data.
#[derive(Debug, Deserialize)]
pub struct ImageForm {
    pub index: usize,
}

/// Display product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<ProductShowTemplate> {
    let detail = load_detail(&session).await?;
    Ok(ProductShowTemplate::new(id, state.featured(), detail, None))
}

/// Step the quantity selector up or down (never below 1).
#[instrument(skip(session))]
pub async fn quantity(
    session: Session,
    Path(id): Path<ProductId>,
    Form(form): Form<QuantityForm>,
) -> Result<Redirect> {
    let mut detail = load_detail(&session).await?;
    match form.action {
        QuantityAction::Increase => detail.increase_quantity(),
        QuantityAction::Decrease => detail.decrease_quantity(),
    }
    save_detail(&session, detail).await?;

    tracing::debug!(quantity = detail.quantity.get(), "Quantity changed");
    Ok(Redirect::to(&detail_url(id)))
}

/// Select which gallery image is displayed.
#[instrument(skip(state, session))]
pub async fn image(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
    Form(form): Form<ImageForm>,
) -> Result<Redirect> {
    let mut detail = load_detail(&session).await?;
    detail.select_image(form.index, state.featured().images.len())?;
    save_detail(&session, detail).await?;

    Ok(Redirect::to(&detail_url(id)))
}

/// Buy Now.
///
/// Shows a notice and changes nothing; it is not connected to the cart or
/// to checkout.
#[instrument(skip(state, session))]
pub async fn buy_now(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<ProductShowTemplate> {
    let detail = load_detail(&session).await?;
    tracing::info!(quantity = detail.quantity.get(), "Buy now pressed");

    Ok(ProductShowTemplate::new(
        id,
        state.featured(),
        detail,
        Some(BUY_NOW_NOTICE.to_string()),
    ))
}
