//! Axum router wiring.

use std::time::Duration;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_checkout, health, list_products, preflight, stripe_webhook, submit_lead, AppState,
};

/// API routes mounted under `/api`.
///
/// # Routes
///
/// - `POST /checkout` - create a hosted checkout session
/// - `POST /webhooks/stripe` - signature-verified webhook ingestion
/// - `POST /leads` - lead capture
/// - `GET /products` - static product catalog
///
/// Each POST route answers OPTIONS preflight with 204.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(create_checkout).options(preflight))
        .route("/webhooks/stripe", post(stripe_webhook).options(preflight))
        .route("/leads", post(submit_lead).options(preflight))
        .route("/products", get(list_products))
}

/// Build the complete application router with middleware applied.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive CORS: the landing page may be served from any origin while the
/// backend moves between environments.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
