//! Checkout route handlers.
//!
//! Submission is simulated: once the form validates, the flow is marked as
//! submitting in the session, a spawned task waits the configured delay and
//! clears it, and the visitor is sent to the confirmation page. Nothing is
//! stored or charged.

use std::time::Duration;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::{Instrument, instrument};

use minimal_store_core::{CheckoutFlow, CheckoutForm, Country, ShippingMethod};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::session_keys;
use crate::state::AppState;

/// Country select option display data for templates.
#[derive(Clone)]
pub struct CountryOptionView {
    pub code: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

/// Shipping radio display data for templates.
#[derive(Clone)]
pub struct ShippingChoiceView {
    pub value: &'static str,
    pub label: &'static str,
    pub estimate: &'static str,
    pub price: String,
    pub checked: bool,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub form: CheckoutForm,
    pub countries: Vec<CountryOptionView>,
    pub shipping: Vec<ShippingChoiceView>,
    pub submitting: bool,
    pub error: Option<String>,
}

impl CheckoutTemplate {
    #[must_use]
    pub fn new(flow: &CheckoutFlow, error: Option<String>) -> Self {
        let form = flow.form.clone();
        Self {
            countries: Country::ALL
                .into_iter()
                .map(|country| CountryOptionView {
                    code: country.code(),
                    name: country.name(),
                    selected: country == form.country,
                })
                .collect(),
            shipping: ShippingMethod::ALL
                .into_iter()
                .map(|method| ShippingChoiceView {
                    value: method.as_str(),
                    label: method.label(),
                    estimate: method.estimate(),
                    price: method.price().to_string(),
                    checked: method == form.shipping_method,
                })
                .collect(),
            submitting: flow.submit_disabled(),
            error,
            form,
        }
    }
}

/// Confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/thank_you.html")]
pub struct ThankYouTemplate;

// =============================================================================
// Session Helpers
// =============================================================================

async fn load_flow(session: &Session) -> Result<CheckoutFlow> {
    Ok(session
        .get::<CheckoutFlow>(session_keys::CHECKOUT)
        .await?
        .unwrap_or_default())
}

async fn save_flow(session: &Session, flow: &CheckoutFlow) -> Result<()> {
    session.insert(session_keys::CHECKOUT, flow).await?;
    Ok(())
}

/// Display the checkout form.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CheckoutTemplate> {
    let flow = load_flow(&session).await?;
    Ok(CheckoutTemplate::new(&flow, None))
}

/// Submit the checkout form.
///
/// Fields are applied one at a time in the order the browser sent them.
/// Responses:
/// - 303 to `/thank-you` after the simulated delay
/// - 400 with the form re-rendered when a required field is missing
/// - 409 with the form disabled while an earlier submission is still running
#[instrument(skip(state, session, fields))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let mut flow = load_flow(&session).await?;

    if flow.submit_disabled() {
        tracing::warn!("Checkout submitted while a submission is in flight");
        return Ok((StatusCode::CONFLICT, CheckoutTemplate::new(&flow, None)).into_response());
    }

    for (name, value) in &fields {
        flow.form.set_field(name, value)?;
    }

    if let Err(e) = flow.begin_submission() {
        tracing::info!(error = %e, "Checkout form rejected");
        save_flow(&session, &flow).await?;
        return Ok((
            StatusCode::BAD_REQUEST,
            CheckoutTemplate::new(&flow, Some(e.to_string())),
        )
            .into_response());
    }

    // Persist before waiting so concurrent requests see the disabled state
    save_flow(&session, &flow).await?;
    session.save().await?;

    let delay = state.config().checkout_delay;
    tracing::info!(
        shipping_method = %flow.form.shipping_method,
        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        "Checkout submission started"
    );
    add_breadcrumb(
        "checkout",
        "Checkout submitted",
        Some(&[("shipping_method", flow.form.shipping_method.as_str())]),
    );

    // The task outlives this request if the visitor disconnects mid-delay
    let finisher = tokio::spawn(
        finish_submission(session, flow, delay).instrument(tracing::Span::current()),
    );
    finisher
        .await
        .map_err(|e| AppError::Internal(format!("checkout task: {e}")))??;

    Ok(Redirect::to("/thank-you").into_response())
}

/// Wait out the simulated delay, then clear the flow from the session.
async fn finish_submission(
    session: Session,
    mut flow: CheckoutFlow,
    delay: Duration,
) -> Result<()> {
    tokio::time::sleep(delay).await;

    flow.complete()
        .map_err(|e| AppError::Internal(format!("checkout flow: {e}")))?;
    session
        .remove::<CheckoutFlow>(session_keys::CHECKOUT)
        .await?;
    session.save().await?;
    tracing::info!(phase = ?flow.phase, "Checkout submission finished");

    Ok(())
}

/// Display the confirmation page.
pub async fn thank_you() -> ThankYouTemplate {
    ThankYouTemplate
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimal_store_core::CheckoutPhase;

    #[test]
    fn test_template_defaults() {
        let page = CheckoutTemplate::new(&CheckoutFlow::default(), None);

        assert!(!page.submitting);
        let selected: Vec<_> = page.countries.iter().filter(|c| c.selected).map(|c| c.code).collect();
        assert_eq!(selected, vec!["US"]);
        let checked: Vec<_> = page.shipping.iter().filter(|s| s.checked).map(|s| s.value).collect();
        assert_eq!(checked, vec!["standard"]);
    }

    #[test]
    fn test_template_disables_submit_while_submitting() {
        let flow = CheckoutFlow {
            phase: CheckoutPhase::Submitting,
            ..CheckoutFlow::default()
        };
        assert!(CheckoutTemplate::new(&flow, None).submitting);
    }
}
