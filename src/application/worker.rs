//! Background webhook event worker.
//!
//! The webhook endpoint acknowledges the provider as soon as the signature
//! verifies; actual processing happens here, on a dedicated task fed by a
//! bounded queue. Every outcome is logged, so post-acknowledgement failures
//! are visible even though the provider already got its 200.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::webhook::ProviderEvent;

use super::process_event::ProcessEventHandler;

/// Sending half of the webhook event queue.
#[derive(Clone)]
pub struct EventQueue {
    tx: mpsc::Sender<ProviderEvent>,
}

impl EventQueue {
    /// Hand a verified event to the worker.
    ///
    /// Never blocks the request path: if the queue is full or the worker is
    /// gone, the event is dropped and logged. The provider's redelivery is
    /// the recovery mechanism in that case.
    pub fn enqueue(&self, event: ProviderEvent) {
        let event_id = event.id.clone();
        if let Err(e) = self.tx.try_send(event) {
            tracing::error!(
                event_id = %event_id,
                error = %e,
                "Failed to enqueue webhook event; dropped"
            );
        }
    }
}

/// Spawn the event worker and return the queue feeding it.
pub fn spawn_event_worker(
    handler: ProcessEventHandler,
    capacity: usize,
) -> (EventQueue, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(capacity);
    let handle = tokio::spawn(run_worker(handler, rx));
    (EventQueue { tx }, handle)
}

async fn run_worker(handler: ProcessEventHandler, mut rx: mpsc::Receiver<ProviderEvent>) {
    tracing::info!("Webhook event worker started");
    while let Some(event) = rx.recv().await {
        match handler.handle(&event).await {
            Ok(outcome) => {
                tracing::info!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    outcome = ?outcome,
                    "Processed webhook event"
                );
            }
            Err(e) => {
                tracing::error!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    error = %e,
                    "Webhook event processing failed after acknowledgement"
                );
            }
        }
    }
    tracing::info!("Webhook event worker stopped");
}
