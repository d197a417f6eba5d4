//! HTTP adapter - the axum surface of the service.

mod dto;
mod error;
mod handlers;
mod routes;

pub use dto::{
    CheckoutRequestDto, CheckoutSessionResponse, ErrorResponse, LeadRequestDto, LeadResponse,
    ProductListResponse, WebhookAck,
};
pub use error::ApiError;
pub use handlers::AppState;
pub use routes::{api_routes, app};
