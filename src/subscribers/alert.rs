//! # Alerting subscriber.
//!
//! [`AlertWriter`] bridges the event bus to the [`Notifier`]: when a cycle
//! fails or shutdown overruns its grace window, a warning goes out. Delivery
//! is best-effort; a rejected alert is printed and dropped.
//!
//! Skips (`CycleSkipped`) are not forwarded: a busy gate means the engine is
//! degrading to skipped cycles, not that something broke.

use std::sync::Arc;

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::notify::Notifier;
use crate::subscribers::Subscribe;

/// Forwards failure events to the configured notifier.
pub struct AlertWriter {
    notifier: Arc<dyn Notifier>,
}

impl AlertWriter {
    /// Creates an alert bridge over the given notifier.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    async fn forward(&self, subject: &str, body: &str) {
        if let Err(e) = self.notifier.send_alert(subject, body).await {
            eprintln!("[sensorvisor] alert delivery failed: {e}");
        }
    }
}

#[async_trait]
impl Subscribe for AlertWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::CycleFailed => {
                let task = e.task.as_deref().unwrap_or("unknown");
                let body = e.reason.as_deref().unwrap_or("no detail");
                self.forward(&format!("cycle `{task}` failed"), body).await;
            }
            EventKind::GraceExceeded => {
                self.forward(
                    "shutdown overran its grace window",
                    "a cycle was still running when the process gave up waiting",
                )
                .await;
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "alert"
    }

    /// Alerts are rare; a small queue keeps memory flat.
    fn queue_capacity(&self) -> usize {
        64
    }
}
