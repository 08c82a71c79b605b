//! # Runtime events emitted by the timers, runner, and cycle tasks.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Cycle events**: guarded execution flow (starting, completed, failed, skipped)
//! - **Timer events**: loop lifecycle (stopped on cancellation)
//! - **Domain events**: sensor read outcomes and alert delivery
//! - **Shutdown events**: stop request and grace accounting
//!
//! The [`Event`] struct carries additional metadata such as timestamps, task
//! name, reasons, attempt counts, and sensor tallies.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use sensorvisor::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::CycleSkipped)
//!     .with_task("sample")
//!     .with_reason("gate busy")
//!     .with_attempts(10);
//!
//! assert_eq!(ev.kind, EventKind::CycleSkipped);
//! assert_eq!(ev.task.as_deref(), Some("sample"));
//! assert_eq!(ev.attempts, Some(10));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Cycle events ===
    /// The gate was acquired and a cycle body is about to run.
    ///
    /// Sets: `task`, `at`, `seq`.
    CycleStarting,

    /// The cycle body completed without error.
    ///
    /// Sets: `task`, `elapsed_ms`, `at`, `seq`.
    CycleCompleted,

    /// The cycle body raised an error; the error was contained.
    ///
    /// Sets: `task`, `reason` (error label + message), `at`, `seq`.
    CycleFailed,

    /// Every gate acquisition attempt found the gate held; the cycle did not
    /// run.
    ///
    /// Sets: `task`, `attempts`, `reason`, `at`, `seq`.
    CycleSkipped,

    // === Timer events ===
    /// A timer observed the stop signal at its wait boundary and exited.
    ///
    /// Sets: `task`, `at`, `seq`.
    TimerStopped,

    // === Domain events ===
    /// A sensor sweep finished; some sensors may have failed to read.
    ///
    /// Sets: `task`, `ok`, `failed`, `at`, `seq`.
    SensorsRead,

    /// An alert was handed to the notifier.
    ///
    /// Sets: `reason` (alert subject), `at`, `seq`.
    AlertSent,

    /// The notifier rejected an alert; delivery is best-effort so this is
    /// informational only.
    ///
    /// Sets: `reason`, `at`, `seq`.
    AlertFailed,

    // === Shutdown events ===
    /// Stop was requested (OS signal observed or foreground loop finished).
    ///
    /// Sets: `at`, `seq`.
    ShutdownRequested,

    /// All timers exited within the configured grace window.
    ///
    /// Sets: `at`, `seq`.
    AllStoppedWithin,

    /// Grace window exceeded; a cycle was still running.
    ///
    /// Sets: `at`, `seq`.
    GraceExceeded,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets: `task` (subscriber name), `reason` (panic info), `at`, `seq`.
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `task` (subscriber name), `reason`, `at`, `seq`.
    SubscriberOverflow,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the task or subscriber, if applicable.
    pub task: Option<Arc<str>>,
    /// Human-readable reason (errors, skip causes, alert subjects).
    pub reason: Option<Arc<str>>,
    /// Gate acquisition attempts made (for skips).
    pub attempts: Option<u32>,
    /// Cycle body execution time in milliseconds (compact).
    pub elapsed_ms: Option<u32>,
    /// Sensors read successfully in a sweep.
    pub ok: Option<u32>,
    /// Sensors that failed to read in a sweep.
    pub failed: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            reason: None,
            attempts: None,
            elapsed_ms: None,
            ok: None,
            failed: None,
        }
    }

    /// Attaches a task (or subscriber) name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a gate acquisition attempt count.
    #[inline]
    pub fn with_attempts(mut self, n: u32) -> Self {
        self.attempts = Some(n);
        self
    }

    /// Attaches the cycle body execution time (stored as milliseconds).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.elapsed_ms = Some(ms);
        self
    }

    /// Attaches sensor sweep tallies.
    #[inline]
    pub fn with_counts(mut self, ok: u32, failed: u32) -> Self {
        self.ok = Some(ok);
        self.failed = Some(failed);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::now(EventKind::SubscriberOverflow)
            .with_task(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::now(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }
}
