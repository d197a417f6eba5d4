//! Stripe wire types.
//!
//! These mirror the Stripe API objects as far as this service reads them;
//! everything else in the payloads is ignored.

use serde::Deserialize;

/// Expandable reference: a bare id, or the expanded object when the request
/// asked for it via `expand[]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    Object(T),
    Id(String),
}

impl<T> Expandable<T> {
    /// The expanded object, if the reference was expanded.
    pub fn object(&self) -> Option<&T> {
        match self {
            Self::Object(obj) => Some(obj),
            Self::Id(_) => None,
        }
    }
}

/// Generic Stripe list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Checkout session as returned by `POST /v1/checkout/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSession {
    /// Session id (cs_...).
    pub id: String,

    /// Hosted checkout URL the browser is redirected to.
    pub url: Option<String>,
}

/// Subscription object from `GET /v1/subscriptions`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscription {
    /// Subscription id (sub_...).
    pub id: String,

    /// Subscription status string.
    pub status: String,

    /// Current period start (Unix timestamp).
    pub current_period_start: i64,

    /// Current period end (Unix timestamp).
    pub current_period_end: i64,

    /// Whether the subscription cancels at period end.
    #[serde(default)]
    pub cancel_at_period_end: bool,

    /// Subscription items (price/quantity pairs).
    #[serde(default)]
    pub items: StripeSubscriptionItems,

    /// Default payment method; an object when expanded, otherwise an id.
    #[serde(default)]
    pub default_payment_method: Option<Expandable<StripePaymentMethod>>,
}

impl StripeSubscription {
    /// Price id of the first subscription item.
    pub fn price_id(&self) -> Option<&str> {
        self.items.data.first().map(|item| item.price.id.as_str())
    }

    /// Card details from the expanded default payment method, when present.
    pub fn card(&self) -> Option<&StripeCard> {
        self.default_payment_method
            .as_ref()
            .and_then(Expandable::object)
            .and_then(|pm| pm.card.as_ref())
    }
}

/// Subscription items container.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StripeSubscriptionItems {
    #[serde(default = "Vec::new")]
    pub data: Vec<StripeSubscriptionItem>,
}

/// Single subscription item.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscriptionItem {
    pub id: String,
    pub price: StripePrice,
}

/// Price object embedded in subscription items.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePrice {
    pub id: String,
}

/// Payment method object (only reached when expanded).
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentMethod {
    pub id: String,

    #[serde(default)]
    pub card: Option<StripeCard>,
}

/// Card details on a payment method.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCard {
    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub last4: Option<String>,
}

/// Stripe API error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeApiError,
}

/// The error object inside a non-2xx Stripe response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
}
