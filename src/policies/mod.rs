//! Gate acquisition policies.
//!
//! This module groups the knobs that control **how long** a timer is willing
//! to wait for the shared gate before giving the cycle up.
//!
//! ## Contents
//! - [`RetryPolicy`] bounded fixed-interval retry (attempts / interval + jitter)
//! - [`JitterPolicy`] randomization strategy to de-synchronize competing timers
//!
//! ## Quick wiring
//! ```text
//! CycleTimer { retry: RetryPolicy, .. }
//!      └─► core::runner::run_guarded uses:
//!           - gate.acquire(&retry) to bound the wait
//!           - retry.delay(attempt) between failed tries
//! ```
//!
//! ## Defaults
//! - `RetryPolicy::default()` → 10 attempts × 500ms (≈5s worst case).
//! - `JitterPolicy::None` by default so retry timing stays predictable;
//!   consider `Equal` when many timers share one gate.

mod jitter;
mod retry;

pub use jitter::JitterPolicy;
pub use retry::RetryPolicy;
