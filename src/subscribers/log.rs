//! # Simple logging subscriber.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [starting] task=sample
//! [completed] task=sample elapsed_ms=12
//! [failed] task=sample err="store_failed: failed to persist readings: disk full"
//! [skipped] task=refresh attempts=10 reason="gate busy after 10 attempts"
//! [timer-stopped] task=sample
//! [sensors] task=sample ok=2 failed=1
//! [shutdown-requested]
//! [all-stopped-within-grace]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Stdout logging subscriber.
///
/// Covers every event kind; implement a custom [`Subscribe`] for structured
/// logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::CycleStarting => {
                if let Some(task) = &e.task {
                    println!("[starting] task={task}");
                }
            }
            EventKind::CycleCompleted => {
                println!(
                    "[completed] task={:?} elapsed_ms={:?}",
                    e.task, e.elapsed_ms
                );
            }
            EventKind::CycleFailed => {
                println!("[failed] task={:?} err={:?}", e.task, e.reason);
            }
            EventKind::CycleSkipped => {
                println!(
                    "[skipped] task={:?} attempts={:?} reason={:?}",
                    e.task, e.attempts, e.reason
                );
            }
            EventKind::TimerStopped => {
                println!("[timer-stopped] task={:?}", e.task);
            }
            EventKind::SensorsRead => {
                println!(
                    "[sensors] task={:?} ok={:?} failed={:?}",
                    e.task, e.ok, e.failed
                );
            }
            EventKind::AlertSent => {
                println!("[alert-sent] subject={:?}", e.reason);
            }
            EventKind::AlertFailed => {
                println!("[alert-failed] reason={:?}", e.reason);
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::AllStoppedWithin => {
                println!("[all-stopped-within-grace]");
            }
            EventKind::GraceExceeded => {
                println!("[grace-exceeded]");
            }
            EventKind::SubscriberPanicked => {
                println!("[subscriber-panicked] name={:?} info={:?}", e.task, e.reason);
            }
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] name={:?} reason={:?}", e.task, e.reason);
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
