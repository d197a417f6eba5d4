//! Checkout session initiation.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::checkout::{CheckoutRequest, CheckoutValidationError};
use crate::ports::{HostedCheckout, PaymentError, PaymentProvider};

/// Raw, unvalidated checkout fields as they arrive from the browser.
#[derive(Debug, Clone, Default)]
pub struct StartCheckoutCommand {
    pub price_id: Option<String>,
    pub mode: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
    pub customer_email: Option<String>,
}

/// Error starting a checkout.
#[derive(Debug, Error)]
pub enum StartCheckoutError {
    #[error(transparent)]
    Validation(#[from] CheckoutValidationError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Validates the request and asks the provider for a hosted session.
pub struct StartCheckoutHandler {
    payment: Arc<dyn PaymentProvider>,
}

impl StartCheckoutHandler {
    pub fn new(payment: Arc<dyn PaymentProvider>) -> Self {
        Self { payment }
    }

    /// Validate and create a checkout session.
    ///
    /// Validation failures never reach the provider.
    pub async fn handle(
        &self,
        cmd: StartCheckoutCommand,
    ) -> Result<HostedCheckout, StartCheckoutError> {
        let request = CheckoutRequest::validate(
            cmd.price_id.as_deref(),
            cmd.mode.as_deref(),
            cmd.success_url.as_deref(),
            cmd.cancel_url.as_deref(),
            cmd.customer_email.as_deref(),
        )?;

        let session = self.payment.create_checkout_session(&request).await?;

        tracing::info!(
            session_id = %session.session_id,
            mode = request.mode.as_str(),
            "Created checkout session"
        );

        Ok(session)
    }
}
