//! HTTP handlers for the three public operations plus the product listing.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::{
    EventQueue, StartCheckoutCommand, StartCheckoutHandler, SubmitLeadCommand, SubmitLeadHandler,
};
use crate::domain::product::ProductCatalog;
use crate::domain::webhook::{WebhookError, WebhookVerifier};
use crate::ports::{CrmConnector, LeadStore, PaymentProvider};

use super::dto::{
    CheckoutRequestDto, CheckoutSessionResponse, LeadRequestDto, LeadResponse,
    ProductListResponse, WebhookAck,
};
use super::error::ApiError;

/// Header carrying the provider's webhook signature.
const SIGNATURE_HEADER: &str = "stripe-signature";

/// Shared application state, cloned per request.
///
/// Dependencies are injected as `Arc<dyn Trait>` handles built once at
/// startup; handlers never reach for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ProductCatalog>,
    pub payment: Arc<dyn PaymentProvider>,
    pub leads: Arc<dyn LeadStore>,
    pub crm: Arc<dyn CrmConnector>,
    pub verifier: Arc<WebhookVerifier>,
    pub events: EventQueue,
}

impl AppState {
    fn start_checkout_handler(&self) -> StartCheckoutHandler {
        StartCheckoutHandler::new(self.payment.clone())
    }

    fn submit_lead_handler(&self) -> SubmitLeadHandler {
        SubmitLeadHandler::new(self.leads.clone(), self.crm.clone())
    }
}

/// POST /api/checkout - create a hosted checkout session.
pub async fn create_checkout(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let dto: CheckoutRequestDto =
        serde_json::from_slice(&body).map_err(|_| ApiError::InvalidJson)?;

    let session = state
        .start_checkout_handler()
        .handle(StartCheckoutCommand {
            price_id: dto.price_id,
            mode: dto.mode,
            success_url: dto.success_url,
            cancel_url: dto.cancel_url,
            customer_email: dto.customer_email,
        })
        .await?;

    Ok(Json(CheckoutSessionResponse {
        session_id: session.session_id,
        url: session.url,
    }))
}

/// POST /api/webhooks/stripe - verify and enqueue a provider event.
///
/// The 200 acknowledgement only certifies receipt of an authentic event;
/// processing happens on the background worker and its failures are logged,
/// not reported here.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSignature)?;

    let event = state.verifier.verify(&body, signature).map_err(|e| {
        tracing::warn!(error = %e, "Webhook rejected");
        e
    })?;

    tracing::info!(
        event_id = %event.id,
        event_type = %event.event_type,
        "Webhook verified; queued for processing"
    );
    state.events.enqueue(event);

    Ok(Json(WebhookAck { received: true }))
}

/// POST /api/leads - capture a contact-form submission.
pub async fn submit_lead(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let dto: LeadRequestDto = serde_json::from_slice(&body).map_err(|_| ApiError::InvalidJson)?;

    let lead = state
        .submit_lead_handler()
        .handle(SubmitLeadCommand {
            name: dto.name,
            email: dto.email,
            phone: dto.phone,
            source: dto.source,
        })
        .await?;

    Ok(Json(LeadResponse {
        success: true,
        message: "Lead submitted successfully".to_string(),
        lead_id: lead.id,
    }))
}

/// GET /api/products - static catalog for the landing page.
pub async fn list_products(State(state): State<AppState>) -> Json<ProductListResponse> {
    Json(ProductListResponse {
        products: state.catalog.products().to_vec(),
    })
}

/// OPTIONS preflight for the POST endpoints; CORS headers come from the layer.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// GET /health - liveness probe.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
