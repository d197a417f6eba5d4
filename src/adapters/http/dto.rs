//! HTTP request/response DTOs.
//!
//! The JSON shapes match what the landing page front end sends and expects.

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/checkout`.
///
/// Fields are optional at this boundary so that missing values produce our
/// field-naming validation errors instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutRequestDto {
    pub price_id: Option<String>,
    pub mode: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
    pub customer_email: Option<String>,
}

/// Body of `POST /api/leads`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadRequestDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Successful checkout creation.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub url: String,
}

/// Acknowledgement returned to the webhook sender.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Successful lead submission.
#[derive(Debug, Clone, Serialize)]
pub struct LeadResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "leadId")]
    pub lead_id: i64,
}

/// Product catalog listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_request_tolerates_missing_fields() {
        let dto: CheckoutRequestDto = serde_json::from_str(r#"{"price_id": "price_1"}"#).unwrap();
        assert_eq!(dto.price_id.as_deref(), Some("price_1"));
        assert!(dto.mode.is_none());
        assert!(dto.customer_email.is_none());
    }

    #[test]
    fn checkout_request_parses_all_fields() {
        let json = r#"{
            "price_id": "price_1",
            "mode": "subscription",
            "success_url": "https://example.com/success",
            "cancel_url": "https://example.com/",
            "customer_email": "jane@example.com"
        }"#;
        let dto: CheckoutRequestDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.mode.as_deref(), Some("subscription"));
        assert_eq!(dto.customer_email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn checkout_response_uses_camel_case_session_id() {
        let response = CheckoutSessionResponse {
            session_id: "cs_1".to_string(),
            url: "https://checkout.stripe.com/c/pay/cs_1".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""sessionId":"cs_1""#));
        assert!(!json.contains("session_id"));
    }

    #[test]
    fn lead_response_uses_camel_case_lead_id() {
        let response = LeadResponse {
            success: true,
            message: "Lead submitted successfully".to_string(),
            lead_id: 42,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""leadId":42"#));
    }

    #[test]
    fn webhook_ack_shape() {
        let json = serde_json::to_string(&WebhookAck { received: true }).unwrap();
        assert_eq!(json, r#"{"received":true}"#);
    }

    #[test]
    fn error_response_shape() {
        let json = serde_json::to_string(&ErrorResponse::new("boom")).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }
}
