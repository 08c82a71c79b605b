//! # Jitter policy for retry delays.
//!
//! [`JitterPolicy`] randomizes gate retry sleeps so that several timers which
//! found the gate busy at the same instant do not keep probing it in
//! lockstep.
//!
//! - [`JitterPolicy::None`] — no randomization, exact delays
//! - [`JitterPolicy::Full`] — random delay in `[0, interval]`
//! - [`JitterPolicy::Equal`] — `interval/2 + random[0, interval/2]`

use rand::Rng;
use std::time::Duration;

/// Policy controlling randomization of retry delays.
///
/// ## Trade-offs
/// - **None**: predictable; fine for a single timer or for tests
/// - **Full**: maximum spreading, can shrink a delay to zero
/// - **Equal**: keeps at least half the interval while still spreading
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// No jitter: use the exact retry interval.
    #[default]
    None,

    /// Full jitter: random delay in `[0, interval]`.
    Full,

    /// Equal jitter: `interval/2 + random[0, interval/2]`.
    Equal,
}

impl JitterPolicy {
    /// Applies this policy to the given delay.
    ///
    /// The result never exceeds the input delay.
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            JitterPolicy::None => delay,
            JitterPolicy::Full => full_jitter(delay),
            JitterPolicy::Equal => equal_jitter(delay),
        }
    }
}

/// Full jitter: random[0, delay]
fn full_jitter(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    if ms == 0 {
        return Duration::ZERO;
    }
    let mut rng = rand::rng();
    Duration::from_millis(rng.random_range(0..=ms))
}

/// Equal jitter: delay/2 + random[0, delay/2]
fn equal_jitter(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    if ms == 0 {
        return Duration::ZERO;
    }
    let half = ms / 2;
    let jitter = if half == 0 {
        0
    } else {
        let mut rng = rand::rng();
        rng.random_range(0..=half)
    };
    Duration::from_millis(half + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_identity() {
        let d = Duration::from_millis(730);
        assert_eq!(JitterPolicy::None.apply(d), d);
    }

    #[test]
    fn test_full_jitter_bounds() {
        let d = Duration::from_millis(500);
        for _ in 0..100 {
            assert!(JitterPolicy::Full.apply(d) <= d);
        }
    }

    #[test]
    fn test_equal_jitter_bounds() {
        let d = Duration::from_millis(500);
        for _ in 0..100 {
            let out = JitterPolicy::Equal.apply(d);
            assert!(out >= Duration::from_millis(250));
            assert!(out <= d);
        }
    }

    #[test]
    fn test_zero_delay_stays_zero() {
        assert_eq!(JitterPolicy::Full.apply(Duration::ZERO), Duration::ZERO);
        assert_eq!(JitterPolicy::Equal.apply(Duration::ZERO), Duration::ZERO);
    }
}
