//! Runtime core: the guarded periodic-execution engine.
//!
//! This module contains the embedded implementation of the sensorvisor
//! engine. One [`CycleTimer`] per cadence drives a background loop; all
//! timers share one [`CycleGate`] so at most one cycle body executes
//! system-wide at any instant, and one [`StopSignal`] so a single trigger
//! stops them all.
//!
//! Internal modules:
//! - [`stop`]: one-shot cancellation token with a timed wait;
//! - [`gate`]: non-blocking mutual exclusion with bounded retry-then-skip;
//! - [`runner`]: one guarded invocation (acquire, run, contain, release);
//! - [`timer`]: the periodic loop and the grace-bounded join helper;
//! - [`shutdown`]: cross-platform OS signal handling.

mod gate;
mod runner;
mod shutdown;
mod stop;
mod timer;

pub use gate::{CycleGate, CycleGuard};
pub use runner::run_guarded;
pub use shutdown::{stop_on_signal, wait_for_shutdown_signal};
pub use stop::StopSignal;
pub use timer::{wait_with_grace, CycleTimer};
