//! Stripe client implementing the payment provider port.
//!
//! Talks to the Stripe REST API directly with form-encoded requests and
//! basic auth, the same way the API's own examples do. Secrets are held in
//! `secrecy::SecretString` so they never appear in debug output.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::PaymentConfig;
use crate::domain::checkout::CheckoutRequest;
use crate::domain::subscription::SubscriptionStatus;
use crate::ports::{
    CardSummary, CustomerSubscription, HostedCheckout, PaymentError, PaymentErrorCode,
    PaymentProvider,
};

use super::types::{StripeCheckoutSession, StripeErrorEnvelope, StripeList, StripeSubscription};

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API client configuration.
#[derive(Clone)]
pub struct StripeConfig {
    api_key: SecretString,
    api_base_url: String,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Build from the validated payment section of the app config.
    pub fn from_payment_config(config: &PaymentConfig) -> Self {
        Self::new(config.stripe_api_key.clone())
    }

    /// Override the API base URL (for tests against a local stub).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe implementation of [`PaymentProvider`].
pub struct StripeClient {
    config: StripeConfig,
    http: reqwest::Client,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn error_from_response(response: reqwest::Response) -> PaymentError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        map_provider_error(status.as_u16(), &body)
    }
}

/// Map a non-2xx Stripe response onto a provider error category.
///
/// The categories are deliberately coarse; raw provider text is kept in the
/// internal message for logs but never shown to users.
fn map_provider_error(status: u16, body: &str) -> PaymentError {
    let parsed: Option<StripeErrorEnvelope> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|e| e.error.message.clone())
        .unwrap_or_else(|| body.to_string());
    let code = parsed.as_ref().and_then(|e| e.error.code.clone());

    if status == 401 || message.contains("Invalid API Key") {
        return PaymentError::new(PaymentErrorCode::InvalidApiKey, message);
    }
    if message.contains("No such price") || code.as_deref() == Some("resource_missing") {
        return PaymentError::new(PaymentErrorCode::UnknownPrice, message);
    }
    PaymentError::provider(format!("Stripe API error (status {status}): {message}"))
}

/// Form parameters for a checkout session create call.
fn checkout_session_params(request: &CheckoutRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("payment_method_types[0]", "card".to_string()),
        ("line_items[0][price]", request.price_id.clone()),
        ("line_items[0][quantity]", "1".to_string()),
        ("mode", request.mode.as_str().to_string()),
        ("success_url", request.success_url.clone()),
        ("cancel_url", request.cancel_url.clone()),
        ("customer_creation", "always".to_string()),
        ("billing_address_collection", "required".to_string()),
    ];
    if let Some(email) = &request.customer_email {
        params.push(("customer_email", email.clone()));
    }
    params
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<HostedCheckout, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&checkout_session_params(request))
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            let err = Self::error_from_response(response).await;
            tracing::error!(error = %err, "Stripe checkout session creation failed");
            return Err(err);
        }

        let session: StripeCheckoutSession = response
            .json()
            .await
            .map_err(|e| PaymentError::provider(format!("Failed to parse Stripe response: {e}")))?;

        let redirect_url = session.url.clone().unwrap_or_else(|| {
            format!("https://checkout.stripe.com/c/pay/{}", session.id)
        });

        Ok(HostedCheckout {
            session_id: session.id,
            url: redirect_url,
        })
    }

    async fn latest_subscription(
        &self,
        customer_id: &str,
    ) -> Result<Option<CustomerSubscription>, PaymentError> {
        let url = format!("{}/v1/subscriptions", self.config.api_base_url);

        let response = self
            .http
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .query(&[
                ("customer", customer_id),
                ("limit", "1"),
                ("status", "all"),
                ("expand[]", "data.default_payment_method"),
            ])
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            let err = Self::error_from_response(response).await;
            tracing::error!(customer_id, error = %err, "Stripe subscription lookup failed");
            return Err(err);
        }

        let list: StripeList<StripeSubscription> = response
            .json()
            .await
            .map_err(|e| PaymentError::provider(format!("Failed to parse Stripe response: {e}")))?;

        Ok(list.data.into_iter().next().map(into_customer_subscription))
    }
}

fn into_customer_subscription(sub: StripeSubscription) -> CustomerSubscription {
    let payment_method = sub.card().and_then(|card| {
        match (card.brand.clone(), card.last4.clone()) {
            (Some(brand), Some(last4)) => Some(CardSummary { brand, last4 }),
            _ => None,
        }
    });

    CustomerSubscription {
        price_id: sub.price_id().map(String::from),
        status: SubscriptionStatus::from_provider(&sub.status),
        current_period_start: sub.current_period_start,
        current_period_end: sub.current_period_end,
        cancel_at_period_end: sub.cancel_at_period_end,
        payment_method,
        id: sub.id,
    }
}
