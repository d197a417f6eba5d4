//! Stripe adapter - payment provider port implementation.

mod client;
mod types;

pub use client::{StripeClient, StripeConfig};
pub use types::{
    Expandable, StripeCard, StripeCheckoutSession, StripeList, StripePaymentMethod, StripePrice,
    StripeSubscription,
};
