//! Ports - contracts between the application core and the outside world.

mod crm;
mod lead_store;
mod order_store;
mod payment_provider;
mod subscription_store;

pub use crm::{CrmConnector, CrmError};
pub use lead_store::{LeadStore, LeadStoreError};
pub use order_store::{OrderInsert, OrderStore, OrderStoreError};
pub use payment_provider::{
    CardSummary, CustomerSubscription, HostedCheckout, PaymentError, PaymentErrorCode,
    PaymentProvider,
};
pub use subscription_store::{SubscriptionStore, SubscriptionStoreError};
