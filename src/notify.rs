//! # Outbound alerting.
//!
//! [`Notifier`] is the delivery contract for warnings: out-of-limit readings
//! and failed cycles. Delivery is best-effort: a rejected alert is logged and
//! forgotten, never retried, and never fails the cycle that raised it.
//!
//! [`LogNotifier`] is the shipped reference implementation; production
//! deployments put a mail or webhook transport behind the same trait. The
//! notifier is an *optional* collaborator: when its construction fails the
//! process logs an [`InitError`](crate::InitError) and runs with alerting
//! disabled.

use async_trait::async_trait;
use thiserror::Error;

/// Delivery failure of a single alert.
#[derive(Error, Debug)]
#[error("alert rejected: {reason}")]
pub struct NotifyError {
    /// Why the transport rejected the alert.
    pub reason: String,
}

/// # Best-effort alert delivery.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Sends one alert. Failure is reported but never acted on.
    async fn send_alert(&self, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Stdout-backed notifier for development and demos.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_alert(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        println!("[alert] {subject}: {body}");
        Ok(())
    }
}
