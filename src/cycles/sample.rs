//! # Slow-cadence sampling cycle.
//!
//! One run: sweep the sensor bank, publish the read tally, alert on every
//! out-of-limit reading, persist the sweep, and every `backup_every`-th run
//! back the data file up.
//!
//! Error posture per collaborator:
//! - reader totally unavailable → `TaskError::Sensors` (cycle fails);
//! - individual sensors failing → counted in the `SensorsRead` event only;
//! - notifier rejecting an alert → `AlertFailed` event, cycle continues;
//! - sink failing → `TaskError::Store` (cycle fails, after alerts went out).

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::error::TaskError;
use crate::events::{Bus, Event, EventKind};
use crate::notify::Notifier;
use crate::sensors::{Reading, SensorReader, Severity};
use crate::store::PersistenceSink;
use crate::tasks::Task;

/// The full read / alert / store / backup cycle.
pub struct SampleCycle {
    reader: Arc<dyn SensorReader>,
    sink: Arc<dyn PersistenceSink>,
    notifier: Option<Arc<dyn Notifier>>,
    bus: Bus,
    backup_every: Option<u32>,
    runs: AtomicU32,
}

impl SampleCycle {
    /// Creates a cycle with alerting and backups disabled.
    pub fn new(reader: Arc<dyn SensorReader>, sink: Arc<dyn PersistenceSink>, bus: Bus) -> Self {
        Self {
            reader,
            sink,
            notifier: None,
            bus,
            backup_every: None,
            runs: AtomicU32::new(0),
        }
    }

    /// Enables out-of-limit alerting through the given notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Backs the data file up every `every`-th run (0 disables).
    pub fn with_backup_every(mut self, every: u32) -> Self {
        self.backup_every = if every == 0 { None } else { Some(every) };
        self
    }

    /// Sends one out-of-limit alert, best-effort.
    async fn alert_out_of_limit(&self, id: &str, reading: &Reading, severity: Severity) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        let subject = format!("{id} reads {severity}");
        let body = format!(
            "value {:.2} outside limits [{:.2}, {:.2}]",
            reading.value, reading.low_limit, reading.high_limit
        );
        match notifier.send_alert(&subject, &body).await {
            Ok(()) => self
                .bus
                .publish(Event::now(EventKind::AlertSent).with_reason(subject)),
            Err(e) => self
                .bus
                .publish(Event::now(EventKind::AlertFailed).with_reason(e.to_string())),
        }
    }
}

#[async_trait]
impl Task for SampleCycle {
    fn name(&self) -> &str {
        "sample"
    }

    async fn run(&self) -> Result<(), TaskError> {
        let outcome = self.reader.read_all().await?;
        self.bus.publish(
            Event::now(EventKind::SensorsRead)
                .with_task(self.name())
                .with_counts(outcome.ok_count(), outcome.failed_count()),
        );

        for (id, reading) in &outcome.readings {
            let severity = reading.severity();
            if severity != Severity::Normal {
                self.alert_out_of_limit(id, reading, severity).await;
            }
        }

        self.sink.store(&outcome).await?;

        let run = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(every) = self.backup_every {
            if run % every == 0 {
                self.sink.backup().await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use crate::notify::NotifyError;
    use crate::sensors::ReadOutcome;

    /// Scripted reader: two good sensors, one failed.
    struct PartialBank;

    #[async_trait]
    impl SensorReader for PartialBank {
        async fn read_all(&self) -> Result<ReadOutcome, TaskError> {
            let mut readings = BTreeMap::new();
            readings.insert(
                "freezer".to_string(),
                Reading { value: -20.0, low_limit: -25.0, high_limit: -15.0 },
            );
            readings.insert(
                "fridge".to_string(),
                Reading { value: 4.0, low_limit: 1.0, high_limit: 8.0 },
            );
            Ok(ReadOutcome {
                readings,
                failed: vec!["cellar".to_string()],
            })
        }
    }

    /// Reader whose one sensor is always hot.
    struct HotBank;

    #[async_trait]
    impl SensorReader for HotBank {
        async fn read_all(&self) -> Result<ReadOutcome, TaskError> {
            let mut readings = BTreeMap::new();
            readings.insert(
                "freezer".to_string(),
                Reading { value: -10.0, low_limit: -25.0, high_limit: -15.0 },
            );
            Ok(ReadOutcome { readings, failed: Vec::new() })
        }
    }

    struct DeadBank;

    #[async_trait]
    impl SensorReader for DeadBank {
        async fn read_all(&self) -> Result<ReadOutcome, TaskError> {
            Err(TaskError::Sensors { error: "bus gone".into() })
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        stored: Mutex<Vec<ReadOutcome>>,
        backups: AtomicU32,
        fail_store: bool,
    }

    #[async_trait]
    impl PersistenceSink for RecordingSink {
        async fn store(&self, outcome: &ReadOutcome) -> Result<(), TaskError> {
            if self.fail_store {
                return Err(TaskError::Store { error: "disk full".into() });
            }
            self.stored.lock().unwrap().push(outcome.clone());
            Ok(())
        }

        async fn backup(&self) -> Result<(), TaskError> {
            self.backups.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        subjects: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_alert(&self, subject: &str, _body: &str) -> Result<(), NotifyError> {
            self.subjects.lock().unwrap().push(subject.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_partial_failure_still_completes() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let sink = Arc::new(RecordingSink::default());
        let cycle = SampleCycle::new(Arc::new(PartialBank), sink.clone(), bus);

        cycle.run().await.expect("partial failure is not an error");

        let ev = rx.recv().await.expect("sensors event");
        assert_eq!(ev.kind, EventKind::SensorsRead);
        assert_eq!(ev.ok, Some(2));
        assert_eq!(ev.failed, Some(1));

        let stored = sink.stored.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].failed, vec!["cellar".to_string()]);
    }

    #[tokio::test]
    async fn test_out_of_limit_reading_raises_alert() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let sink = Arc::new(RecordingSink::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let cycle = SampleCycle::new(Arc::new(HotBank), sink, bus)
            .with_notifier(notifier.clone());

        cycle.run().await.expect("cycle ok");

        let subjects = notifier.subjects.lock().unwrap();
        assert_eq!(subjects.as_slice(), ["freezer reads hot"]);

        let _sensors = rx.recv().await.expect("sensors event");
        let alert = rx.recv().await.expect("alert event");
        assert_eq!(alert.kind, EventKind::AlertSent);
    }

    #[tokio::test]
    async fn test_in_range_readings_stay_silent() {
        let bus = Bus::new(16);
        let sink = Arc::new(RecordingSink::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let cycle = SampleCycle::new(Arc::new(PartialBank), sink, bus)
            .with_notifier(notifier.clone());

        cycle.run().await.expect("cycle ok");
        assert!(notifier.subjects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_becomes_task_error() {
        let bus = Bus::new(16);
        let sink = Arc::new(RecordingSink { fail_store: true, ..Default::default() });
        let cycle = SampleCycle::new(Arc::new(PartialBank), sink, bus);

        let err = cycle.run().await.expect_err("store failure propagates");
        assert_eq!(err.as_label(), "store_failed");
    }

    #[tokio::test]
    async fn test_dead_bank_becomes_task_error() {
        let bus = Bus::new(16);
        let sink = Arc::new(RecordingSink::default());
        let cycle = SampleCycle::new(Arc::new(DeadBank), sink.clone(), bus);

        let err = cycle.run().await.expect_err("dead bank propagates");
        assert_eq!(err.as_label(), "sensors_unavailable");
        assert!(sink.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backup_runs_on_schedule() {
        let bus = Bus::new(16);
        let sink = Arc::new(RecordingSink::default());
        let cycle = SampleCycle::new(Arc::new(PartialBank), sink.clone(), bus)
            .with_backup_every(3);

        for _ in 0..7 {
            cycle.run().await.expect("cycle ok");
        }
        // Runs 3 and 6 trigger backups.
        assert_eq!(sink.backups.load(Ordering::SeqCst), 2);
    }
}
