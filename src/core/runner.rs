//! # Run one guarded invocation of a cycle task.
//!
//! This helper drives a single invocation of a [`Task`] under the shared
//! [`CycleGate`], publishing lifecycle [`Event`]s to the [`Bus`].
//!
//! ```text
//!   ┌────────────┐
//!   │    Task    │
//!   └──────┬─────┘
//!    run_guarded()
//!          ▼
//!  gate.acquire(retry) ──► busy? ──► CycleSkipped, no execution
//!          │
//!          ▼ (guard held)
//!  CycleStarting ──► task.run() ──► CycleCompleted / CycleFailed
//!          │
//!          ▼
//!  guard dropped (gate released on every path)
//! ```
//!
//! Per invocation there is exactly one task execution or one skip, and
//! exactly one outcome event. Task errors are contained here; nothing
//! propagates to the calling timer.

use tokio::time::Instant;

use crate::{
    core::gate::CycleGate,
    events::{Bus, Event, EventKind},
    policies::RetryPolicy,
    tasks::Task,
};

/// Executes one guarded invocation of a task.
///
/// Acquires the gate with the bounded retry policy; on exhaustion the cycle
/// is skipped and a [`EventKind::CycleSkipped`] is published. On acquisition
/// the task runs inside the guard's scope and its outcome is published as
/// [`EventKind::CycleCompleted`] or [`EventKind::CycleFailed`].
pub async fn run_guarded<T: Task + ?Sized>(
    task: &T,
    gate: &CycleGate,
    retry: &RetryPolicy,
    bus: &Bus,
) {
    let _guard = match gate.acquire(retry).await {
        Ok(guard) => guard,
        Err(busy) => {
            publish_skipped(bus, task.name(), retry.attempts_clamped(), &busy.as_message());
            return;
        }
    };

    bus.publish(Event::now(EventKind::CycleStarting).with_task(task.name()));

    let started = Instant::now();
    match task.run().await {
        Ok(()) => publish_completed(bus, task.name(), started),
        Err(e) => publish_failed(bus, task.name(), &format!("{}: {}", e.as_label(), e)),
    }
    // _guard drops here, releasing the gate for the next timer.
}

/// Publishes a `CycleSkipped` event after exhausted acquisition.
fn publish_skipped(bus: &Bus, name: &str, attempts: u32, reason: &str) {
    bus.publish(
        Event::now(EventKind::CycleSkipped)
            .with_task(name)
            .with_attempts(attempts)
            .with_reason(reason.to_string()),
    );
}

/// Publishes a `CycleCompleted` event with the body's elapsed time.
fn publish_completed(bus: &Bus, name: &str, started: Instant) {
    bus.publish(
        Event::now(EventKind::CycleCompleted)
            .with_task(name)
            .with_elapsed(started.elapsed()),
    );
}

/// Publishes a `CycleFailed` event with the contained error.
fn publish_failed(bus: &Bus, name: &str, reason: &str) {
    bus.publish(
        Event::now(EventKind::CycleFailed)
            .with_task(name)
            .with_reason(reason.to_string()),
    );
}
