//! Application layer - one handler per operation, plus the event worker.

mod process_event;
mod record_order;
mod start_checkout;
mod submit_lead;
mod sync_subscription;
mod worker;

pub use process_event::{EventOutcome, ProcessEventError, ProcessEventHandler};
pub use record_order::{RecordOrderHandler, RecordOrderResult};
pub use start_checkout::{StartCheckoutCommand, StartCheckoutError, StartCheckoutHandler};
pub use submit_lead::{SubmitLeadCommand, SubmitLeadError, SubmitLeadHandler};
pub use sync_subscription::{SyncError, SyncResult, SyncSubscriptionHandler};
pub use worker::{spawn_event_worker, EventQueue};
