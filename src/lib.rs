//! # sensorvisor
//!
//! **Sensorvisor** is a small runtime for polling environmental sensors on
//! fixed cadences, persisting the readings, redrawing a status display, and
//! sending best-effort alerts.
//!
//! Its heart is a guarded periodic-execution engine: any number of timers
//! wake on their own periods, but all cycle bodies funnel through one shared
//! gate, so no two of them ever run at the same time. A timer that cannot
//! get the gate within its bounded retries skips that cycle instead of
//! blocking behind a hung competitor.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌───────────────┐        ┌───────────────┐
//!  │  CycleTimer   │        │  CycleTimer   │     (one per cadence)
//!  │ (sample, 15s) │        │ (refresh, 5s) │
//!  └──────┬────────┘        └──────┬────────┘
//!         │  stop.wait_for(period) │
//!         ▼                        ▼
//!  ┌───────────────────────────────────────────┐
//!  │ run_guarded (one invocation)              │
//!  │   gate.acquire(retry) ── busy? ──► skip   │
//!  │   task.run()          ── error? ──► contain│
//!  │   guard drop          ── always releases  │
//!  └──────┬────────────────────────────────────┘
//!         │ publishes Events
//!         ▼
//!  ┌──────────────┐     ┌──────────────────────┐
//!  │     Bus      │────►│ SubscriberSet        │
//!  │ (broadcast)  │     │  ├─ LogWriter        │
//!  └──────────────┘     │  └─ AlertWriter ──► Notifier
//!                       └──────────────────────┘
//!
//!  Shared by every timer:
//!    StopSignal — one-shot cancellation, observed at wait boundaries only
//!    CycleGate  — one-permit gate; at most one cycle body system-wide
//! ```
//!
//! ### Lifecycle of one timer
//! ```text
//! CycleTimer::new(task, period, stop, gate, retry, bus)   (period > 0 enforced)
//!     └─► spawn()
//!          loop {
//!            ├─► fired = stop.wait_for(period)
//!            ├─► fired ─► publish TimerStopped, exit      (terminal)
//!            └─► else  ─► run_guarded(task, gate, retry)
//!          }
//! ```
//!
//! ## Features
//! | Area           | Description                                               | Key types / traits                         |
//! |----------------|-----------------------------------------------------------|--------------------------------------------|
//! | **Engine**     | Guarded periodic execution with skip-on-busy.             | [`CycleTimer`], [`CycleGate`], [`StopSignal`] |
//! | **Policies**   | Bounded gate retry with optional jitter.                  | [`RetryPolicy`], [`JitterPolicy`]          |
//! | **Events**     | Lifecycle and domain events over a broadcast bus.         | [`Event`], [`EventKind`], [`Bus`]          |
//! | **Subscribers**| Hook into runtime events (logging, alert bridging).       | [`Subscribe`], [`LogWriter`], [`AlertWriter`] |
//! | **Tasks**      | Cycle bodies as trait objects or plain closures.          | [`Task`], [`TaskFn`], [`TaskRef`]          |
//! | **Domain**     | Sensor sweeps, persistence, display, alerting contracts.  | [`SensorReader`], [`PersistenceSink`], [`DisplayRenderer`], [`Notifier`] |
//! | **Cycles**     | The shipped sample and refresh bodies.                    | [`SampleCycle`], [`RefreshCycle`]          |
//! | **Errors**     | Fatal vs contained vs skipped, explicitly typed.          | [`ConfigError`], [`TaskError`], [`RuntimeError`] |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use sensorvisor::{
//!     Bus, CycleGate, CycleTimer, RetryPolicy, StopSignal, TaskError, TaskFn, TaskRef,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stop = StopSignal::new();
//!     let gate = CycleGate::new();
//!     let bus = Bus::new(64);
//!
//!     let tick: TaskRef = TaskFn::arc("tick", || async move {
//!         println!("cycle");
//!         Ok::<_, TaskError>(())
//!     });
//!
//!     let timer = CycleTimer::new(
//!         tick,
//!         Duration::from_millis(50),
//!         stop.clone(),
//!         gate.clone(),
//!         RetryPolicy::default(),
//!         bus.clone(),
//!     )?;
//!     let handle = timer.spawn();
//!
//!     tokio::time::sleep(Duration::from_millis(160)).await;
//!     stop.set();
//!     handle.await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod cycles;
mod display;
mod error;
mod events;
mod notify;
mod policies;
mod sensors;
mod store;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use config::{Config, SensorConfig};
pub use core::{
    run_guarded, stop_on_signal, wait_for_shutdown_signal, wait_with_grace, CycleGate,
    CycleGuard, CycleTimer, StopSignal,
};
pub use cycles::{RefreshCycle, SampleCycle};
pub use display::{ConsoleDisplay, DisplayRenderer, DisplayRow};
pub use error::{ConfigError, InitError, RuntimeError, TaskError};
pub use events::{Bus, Event, EventKind};
pub use notify::{LogNotifier, Notifier, NotifyError};
pub use policies::{JitterPolicy, RetryPolicy};
pub use sensors::{ReadOutcome, Reading, SensorReader, Severity, SimReader, SimSensor};
pub use store::{JsonlSink, PersistenceSink, SweepRecord};
pub use subscribers::{AlertWriter, LogWriter, Subscribe, SubscriberSet};
pub use tasks::{Task, TaskFn, TaskRef};
