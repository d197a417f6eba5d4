//! API error type and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::{StartCheckoutError, SubmitLeadError};
use crate::domain::webhook::WebhookError;
use crate::ports::{PaymentError, PaymentErrorCode};

use super::dto::ErrorResponse;

/// Error returned by any HTTP handler, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request body.
    InvalidJson,
    /// Input failed validation; message names the offending field.
    Validation(String),
    /// Webhook authentication failure.
    WebhookRejected(WebhookError),
    /// Duplicate resource (lead email already on file).
    Conflict(String),
    /// Payment provider failure, categorized.
    Payment(PaymentError),
    /// Anything else.
    Internal(String),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::InvalidJson => (
                StatusCode::BAD_REQUEST,
                "Invalid JSON in request body".to_string(),
            ),
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::WebhookRejected(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Conflict(message) => (StatusCode::CONFLICT, message.clone()),
            Self::Payment(err) => {
                let status = match err.code {
                    PaymentErrorCode::UnknownPrice => StatusCode::BAD_REQUEST,
                    PaymentErrorCode::InvalidApiKey
                    | PaymentErrorCode::Network
                    | PaymentErrorCode::Provider => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.user_message().to_string())
            }
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<StartCheckoutError> for ApiError {
    fn from(err: StartCheckoutError) -> Self {
        match err {
            StartCheckoutError::Validation(e) => Self::Validation(e.to_string()),
            StartCheckoutError::Payment(e) => Self::Payment(e),
        }
    }
}

impl From<SubmitLeadError> for ApiError {
    fn from(err: SubmitLeadError) -> Self {
        match err {
            SubmitLeadError::Validation(e) => Self::Validation(e.to_string()),
            SubmitLeadError::DuplicateEmail => {
                Self::Conflict("This email is already registered".to_string())
            }
            SubmitLeadError::Store(_) => {
                Self::Internal("Failed to save lead information".to_string())
            }
        }
    }
}

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        Self::WebhookRejected(err)
    }
}
