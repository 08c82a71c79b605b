//! # One-shot cooperative stop signal with a timed wait.
//!
//! [`StopSignal`] is the single cancellation mechanism of the engine. It is
//! set exactly once (further calls are no-ops) and observed by every timer at
//! its wait boundary via [`StopSignal::wait_for`]. A cycle body that has
//! already started is never interrupted; it runs to completion and the timer
//! exits at its next wait.
//!
//! Internally this wraps a [`CancellationToken`]; the timed wait is a select
//! between cancellation and a sleep.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use sensorvisor::StopSignal;
//!
//! # #[tokio::main(flavor = "current_thread")] async fn main() {
//! let stop = StopSignal::new();
//! stop.set();
//! stop.set(); // idempotent
//! assert!(stop.wait_for(Duration::from_secs(3600)).await);
//! # }
//! ```

use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

/// One-shot, idempotent stop signal shared by all timers.
///
/// Cloning is cheap and every clone observes the same underlying signal.
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    token: CancellationToken,
}

impl StopSignal {
    /// Creates a fresh, un-fired signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the signal as fired.
    ///
    /// Safe to call multiple times or concurrently; every call after the
    /// first has no effect.
    pub fn set(&self) {
        self.token.cancel();
    }

    /// Returns `true` once [`StopSignal::set`] has been called.
    pub fn is_set(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits until either `period` elapses (`false`) or the signal fires
    /// (`true`).
    ///
    /// Returns immediately with `true` when the signal is already set.
    pub async fn wait_for(&self, period: Duration) -> bool {
        tokio::select! {
            _ = self.token.cancelled() => true,
            _ = time::sleep(period) => false,
        }
    }

    /// Waits until the signal fires, with no timeout.
    pub async fn wait(&self) {
        self.token.cancelled().await;
    }
}
