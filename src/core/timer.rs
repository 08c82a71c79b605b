//! # CycleTimer: the periodic driver for one cycle task.
//!
//! A [`CycleTimer`] owns a period, a [`Task`] and shared handles to the
//! [`StopSignal`] and [`CycleGate`], and drives a background loop:
//!
//! ```text
//! spawn()
//!   │
//!   ▼
//! loop {
//!   ├─► stop.wait_for(period)
//!   │       ├─ fired   ──► publish TimerStopped, exit (terminal)
//!   │       └─ timeout ──► run_guarded(task, gate, retry)
//!   └─► repeat
//! }
//! ```
//!
//! ## Rules
//! - Invocations within one timer are **strictly sequential**; the next wait
//!   starts only after the previous invocation returned.
//! - Across timers the only ordering is the gate's mutual exclusion of cycle
//!   bodies.
//! - Cancellation is observed **only at the wait boundary**: a body that has
//!   started runs to completion even if the signal fires meanwhile.
//! - Several timers may share one signal and one gate; that is the intended
//!   wiring (one trigger stops everything, no two bodies overlap).

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

use crate::{
    core::gate::CycleGate,
    core::runner::run_guarded,
    core::stop::StopSignal,
    error::{ConfigError, RuntimeError},
    events::{Bus, Event, EventKind},
    policies::RetryPolicy,
    tasks::TaskRef,
};

/// Periodic driver for a single cycle task.
///
/// Construct with [`CycleTimer::new`], then [`CycleTimer::spawn`] to start
/// the background loop. The timer runs until the shared [`StopSignal`] fires
/// and its wait observes it; it then exits permanently.
pub struct CycleTimer {
    task: TaskRef,
    period: Duration,
    stop: StopSignal,
    gate: CycleGate,
    retry: RetryPolicy,
    bus: Bus,
}

impl CycleTimer {
    /// Creates a timer for `task`, waking every `period`.
    ///
    /// A zero period is invalid configuration and rejected here, before
    /// anything is spawned.
    pub fn new(
        task: TaskRef,
        period: Duration,
        stop: StopSignal,
        gate: CycleGate,
        retry: RetryPolicy,
        bus: Bus,
    ) -> Result<Self, ConfigError> {
        if period.is_zero() {
            return Err(ConfigError::Invalid {
                field: "period",
                reason: format!("task `{}` needs a positive period", task.name()),
            });
        }
        Ok(Self {
            task,
            period,
            stop,
            gate,
            retry,
            bus,
        })
    }

    /// Returns the task name this timer drives.
    pub fn name(&self) -> &str {
        self.task.name()
    }

    /// Returns the configured period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts the background loop and returns its join handle.
    ///
    /// One spawned worker per timer; timers run in parallel on the
    /// multi-threaded runtime and coordinate only through the gate.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// The timer loop: wait a full period, then invoke, until stopped.
    async fn run(self) {
        loop {
            if self.stop.wait_for(self.period).await {
                self.bus
                    .publish(Event::now(EventKind::TimerStopped).with_task(self.task.name()));
                break;
            }
            run_guarded(self.task.as_ref(), &self.gate, &self.retry, &self.bus).await;
        }
    }
}

/// Waits for every timer handle within the grace window.
///
/// Publishes [`EventKind::AllStoppedWithin`] when all loops exited in time,
/// or [`EventKind::GraceExceeded`] and returns
/// [`RuntimeError::GraceExceeded`] when some cycle was still running; the
/// stragglers are left to finish detached.
pub async fn wait_with_grace(
    handles: Vec<JoinHandle<()>>,
    grace: Duration,
    bus: &Bus,
) -> Result<(), RuntimeError> {
    let join_all = async {
        for handle in handles {
            let _ = handle.await;
        }
    };

    match time::timeout(grace, join_all).await {
        Ok(()) => {
            bus.publish(Event::now(EventKind::AllStoppedWithin));
            Ok(())
        }
        Err(_) => {
            bus.publish(Event::now(EventKind::GraceExceeded));
            Err(RuntimeError::GraceExceeded { grace })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::policies::JitterPolicy;
    use crate::tasks::TaskFn;

    fn retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 10,
            interval: Duration::from_millis(500),
            jitter: JitterPolicy::None,
        }
    }

    fn counting_task(name: &'static str, hits: Arc<AtomicU32>) -> TaskRef {
        TaskFn::arc(name, move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
    }

    #[tokio::test]
    async fn test_zero_period_rejected() {
        let err = CycleTimer::new(
            counting_task("never", Arc::new(AtomicU32::new(0))),
            Duration::ZERO,
            StopSignal::new(),
            CycleGate::new(),
            retry(),
            Bus::new(16),
        )
        .err()
        .expect("zero period must be rejected");
        assert_eq!(err.as_label(), "config_invalid");
    }

    #[tokio::test(start_paused = true)]
    async fn test_invocation_count_is_floor_of_elapsed_over_period() {
        let hits = Arc::new(AtomicU32::new(0));
        let stop = StopSignal::new();
        let timer = CycleTimer::new(
            counting_task("sample", hits.clone()),
            Duration::from_secs(15),
            stop.clone(),
            CycleGate::new(),
            retry(),
            Bus::new(64),
        )
        .expect("valid timer");
        let handle = timer.spawn();

        // 46 seconds elapsed: invocations at t=15, 30, 45.
        time::sleep(Duration::from_secs(46)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 3);

        stop.set();
        handle.await.expect("join");
        assert_eq!(hits.load(Ordering::SeqCst), 3, "no invocation after stop");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_before_first_period_means_zero_invocations() {
        let hits = Arc::new(AtomicU32::new(0));
        let stop = StopSignal::new();
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let timer = CycleTimer::new(
            counting_task("sample", hits.clone()),
            Duration::from_secs(15),
            stop.clone(),
            CycleGate::new(),
            retry(),
            bus,
        )
        .expect("valid timer");
        let handle = timer.spawn();

        time::sleep(Duration::from_secs(3)).await;
        stop.set();
        handle.await.expect("join");

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::TimerStopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_timers_share_gate_without_overlap() {
        // Guarded concurrency probe: `active` counts bodies currently inside
        // the critical section, `peak` records the worst case observed.
        let active = Arc::new(AtomicU32::new(0));
        let peak = Arc::new(AtomicU32::new(0));
        let total = Arc::new(AtomicU32::new(0));

        let probe = |name: &'static str| {
            let active = active.clone();
            let peak = peak.clone();
            let total = total.clone();
            TaskFn::arc(name, move || {
                let active = active.clone();
                let peak = peak.clone();
                let total = total.clone();
                async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    total.fetch_add(1, Ordering::SeqCst);
                    time::sleep(Duration::from_millis(700)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    Ok(())
                }
            })
        };

        let stop = StopSignal::new();
        let gate = CycleGate::new();
        let bus = Bus::new(256);

        let fast = CycleTimer::new(
            probe("fast"),
            Duration::from_secs(5),
            stop.clone(),
            gate.clone(),
            retry(),
            bus.clone(),
        )
        .expect("valid timer");
        let slow = CycleTimer::new(
            probe("slow"),
            Duration::from_secs(15),
            stop.clone(),
            gate.clone(),
            retry(),
            bus.clone(),
        )
        .expect("valid timer");

        let handles = vec![fast.spawn(), slow.spawn()];
        time::sleep(Duration::from_secs(16)).await;
        stop.set();
        for h in handles {
            h.await.expect("join");
        }

        // 5s timer fires at 5, 10, 15; 15s timer fires at 15 (possibly
        // delayed past the gate). Never more than 3 + 1 invocations total.
        let total = total.load(Ordering::SeqCst);
        assert!(total <= 4, "expected at most 4 invocations, got {total}");
        assert!(total >= 3, "fast timer alone contributes 3, got {total}");
        assert_eq!(peak.load(Ordering::SeqCst), 1, "cycle bodies overlapped");
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_with_grace_reports_stragglers() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();

        let quick = tokio::spawn(async {});
        let ok = wait_with_grace(vec![quick], Duration::from_secs(1), &bus).await;
        assert!(ok.is_ok());
        assert_eq!(rx.recv().await.expect("event").kind, EventKind::AllStoppedWithin);

        let stuck = tokio::spawn(async {
            time::sleep(Duration::from_secs(3600)).await;
        });
        let err = wait_with_grace(vec![stuck], Duration::from_secs(1), &bus)
            .await
            .expect_err("straggler must exceed grace");
        assert_eq!(err.as_label(), "grace_exceeded");
        assert_eq!(rx.recv().await.expect("event").kind, EventKind::GraceExceeded);
    }
}
