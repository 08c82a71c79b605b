//! # Mutual-exclusion gate shared by all timers.
//!
//! [`CycleGate`] guards the single critical section of the engine: the cycle
//! body. Acquisition is non-blocking at its core ([`CycleGate::try_acquire`])
//! with a bounded retry-then-skip policy layered on top
//! ([`CycleGate::acquire`]): a caller that cannot get the gate within
//! `max_attempts × interval` gives up and skips its cycle instead of
//! blocking forever behind a hung competitor.
//!
//! Internally the gate is a one-permit [`Semaphore`]. A successful
//! acquisition hands back a [`CycleGuard`] owning the permit; dropping the
//! guard releases the gate, so release happens on every exit path, including
//! a panicking or failing cycle body.
//!
//! Known residual risk: a cycle body that never returns holds the gate
//! forever and starves every other timer sharing it. Competing timers degrade
//! to skipping cycles; nothing deadlocks.
//!
//! ## Example
//! ```rust
//! use sensorvisor::{CycleGate, RetryPolicy};
//!
//! # #[tokio::main(flavor = "current_thread")] async fn main() {
//! let gate = CycleGate::new();
//!
//! let guard = gate.try_acquire().expect("gate is free");
//! assert!(gate.try_acquire().is_none()); // held
//! drop(guard);
//! assert!(gate.try_acquire().is_some()); // free again
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time;

use crate::error::RuntimeError;
use crate::policies::RetryPolicy;

/// Shared mutual-exclusion gate.
///
/// Cloning is cheap; every clone refers to the same underlying gate. The gate
/// is passed explicitly to every timer that must coordinate through it.
#[derive(Clone, Debug)]
pub struct CycleGate {
    sem: Arc<Semaphore>,
}

/// RAII acquisition of a [`CycleGate`].
///
/// Holding the guard *is* holding the gate; dropping it releases the gate
/// exactly once, on success and failure paths alike.
#[derive(Debug)]
pub struct CycleGuard {
    _permit: OwnedSemaphorePermit,
}

impl CycleGate {
    /// Creates a free gate.
    pub fn new() -> Self {
        Self {
            sem: Arc::new(Semaphore::new(1)),
        }
    }

    /// Non-blocking acquisition.
    ///
    /// Returns `Some(guard)` and transitions free→held iff the gate is
    /// currently free; returns `None` without side effects when it is held.
    pub fn try_acquire(&self) -> Option<CycleGuard> {
        self.sem
            .clone()
            .try_acquire_owned()
            .ok()
            .map(|permit| CycleGuard { _permit: permit })
    }

    /// Bounded acquisition: retries [`RetryPolicy::max_attempts`] times,
    /// sleeping [`RetryPolicy::interval`] after each failed try.
    ///
    /// Returns the guard on the first success, or
    /// [`RuntimeError::GateBusy`] when every attempt found the gate held;
    /// the caller must then skip this cycle.
    pub async fn acquire(&self, retry: &RetryPolicy) -> Result<CycleGuard, RuntimeError> {
        let attempts = retry.attempts_clamped();
        for attempt in 1..=attempts {
            if let Some(guard) = self.try_acquire() {
                return Ok(guard);
            }
            time::sleep(retry.delay(attempt)).await;
        }
        Err(RuntimeError::GateBusy { attempts })
    }

    /// Returns `true` while some caller holds the gate.
    pub fn is_held(&self) -> bool {
        self.sem.available_permits() == 0
    }
}

impl Default for CycleGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::policies::JitterPolicy;

    fn quick_retry(max_attempts: u32, interval_ms: u64) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            interval: Duration::from_millis(interval_ms),
            jitter: JitterPolicy::None,
        }
    }

    #[tokio::test]
    async fn test_only_one_try_acquire_wins() {
        let gate = CycleGate::new();
        let guards: Vec<_> = (0..16).map(|_| gate.try_acquire()).collect();
        let won = guards.iter().filter(|g| g.is_some()).count();
        assert_eq!(won, 1);
        assert!(gate.is_held());

        drop(guards);
        assert!(!gate.is_held());
    }

    #[tokio::test]
    async fn test_concurrent_try_acquire_single_winner() {
        let gate = CycleGate::new();
        let mut joins = Vec::new();
        for _ in 0..16 {
            let gate = gate.clone();
            // Winners keep their guard alive until every task has attempted.
            joins.push(tokio::spawn(async move { gate.try_acquire() }));
        }
        let mut guards = Vec::new();
        for j in joins {
            guards.push(j.await.expect("join"));
        }
        let won = guards.iter().filter(|g| g.is_some()).count();
        assert_eq!(won, 1);
        assert!(gate.is_held());
    }

    #[tokio::test]
    async fn test_release_on_drop_after_failure() {
        let gate = CycleGate::new();
        let result: Result<(), &str> = {
            let _guard = gate.try_acquire().expect("free");
            Err("task blew up")
        };
        assert!(result.is_err());
        // Guard dropped with the failing scope: a different caller succeeds.
        assert!(gate.try_acquire().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_retry_exhausts_and_reports_attempts() {
        let gate = CycleGate::new();
        let _held = gate.try_acquire().expect("free");

        let before = time::Instant::now();
        let err = gate
            .acquire(&quick_retry(10, 500))
            .await
            .expect_err("gate is permanently held");

        match err {
            RuntimeError::GateBusy { attempts } => assert_eq!(attempts, 10),
            other => panic!("unexpected error: {other}"),
        }
        // 10 attempts, each followed by a 500ms sleep.
        assert_eq!(before.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeds_once_gate_frees() {
        let gate = CycleGate::new();
        let held = gate.try_acquire().expect("free");

        let acquirer = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.acquire(&quick_retry(10, 500)).await })
        };

        // Free the gate while the acquirer is mid-retry.
        time::sleep(Duration::from_millis(1200)).await;
        drop(held);

        let guard = acquirer.await.expect("join").expect("acquired");
        drop(guard);
        assert!(!gate.is_held());
    }

    #[tokio::test]
    async fn test_acquire_on_free_gate_is_immediate() {
        let gate = CycleGate::new();
        let guard = gate
            .acquire(&quick_retry(1, 500))
            .await
            .expect("free gate acquires on first try");
        assert!(gate.is_held());
        drop(guard);
    }
}
