//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to runtime events emitted by the timers, the guarded
//! runner, the cycle tasks, and subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `CycleTimer`, `core::runner::run_guarded`, the cycle
//!   tasks (`SampleCycle`, `RefreshCycle`), `wait_with_grace`, and
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the process entry point's bus listener, which fans events
//!   out to a `SubscriberSet`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
