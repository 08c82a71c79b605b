//! # Bounded retry policy for gate acquisition.
//!
//! [`RetryPolicy`] controls how a timer competes for the shared cycle gate:
//! up to [`RetryPolicy::max_attempts`] non-blocking tries, sleeping
//! [`RetryPolicy::interval`] after each failed try. When every attempt finds
//! the gate held, the acquisition fails and the caller skips the cycle.
//!
//! The worst-case blocked time is `max_attempts × interval` (plus scheduling
//! jitter). Delays are fixed rather than growing: the contended resource is a
//! single in-process gate, and the competitor is expected to release within a
//! couple of periods or never.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use sensorvisor::{JitterPolicy, RetryPolicy};
//!
//! let retry = RetryPolicy {
//!     max_attempts: 10,
//!     interval: Duration::from_millis(500),
//!     jitter: JitterPolicy::None,
//! };
//!
//! assert_eq!(retry.delay(3), Duration::from_millis(500));
//! assert_eq!(retry.worst_case(), Duration::from_secs(5));
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;

/// Gate acquisition retry policy.
///
/// Encapsulates the bounded retry-then-skip behavior:
/// - [`RetryPolicy::max_attempts`] — total tries before the cycle is skipped;
/// - [`RetryPolicy::interval`] — sleep between failed tries;
/// - [`RetryPolicy::jitter`] — optional randomization of that sleep.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Total acquisition attempts (minimum 1, clamped by the gate).
    pub max_attempts: u32,
    /// Delay after each failed attempt.
    pub interval: Duration,
    /// Jitter applied to the delay to de-synchronize competing timers.
    pub jitter: JitterPolicy,
}

impl Default for RetryPolicy {
    /// Returns a policy with:
    /// - `max_attempts = 10`;
    /// - `interval = 500ms`;
    /// - `jitter = None`.
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_millis(500),
            jitter: JitterPolicy::None,
        }
    }
}

impl RetryPolicy {
    /// Computes the sleep before the next attempt (1-indexed).
    ///
    /// The base is always [`RetryPolicy::interval`]; the attempt number only
    /// exists so jitter strategies could key off it. With
    /// [`JitterPolicy::None`] the result is exact.
    pub fn delay(&self, attempt: u32) -> Duration {
        let _ = attempt;
        self.jitter.apply(self.interval)
    }

    /// Upper bound on the total time a caller can spend blocked in
    /// acquisition: `max_attempts × interval`.
    ///
    /// Jitter never increases a delay, so this bound holds for every policy.
    pub fn worst_case(&self) -> Duration {
        self.interval.saturating_mul(self.max_attempts.max(1))
    }

    /// Attempt count clamped to a minimum of one try.
    #[inline]
    pub(crate) fn attempts_clamped(&self) -> u32 {
        self.max_attempts.max(1)
    }
}
