//! # Fast-cadence display refresh cycle.
//!
//! One run: sweep the sensor bank, classify each reading against its limits,
//! and redraw the display. Sensors that failed this sweep simply drop off the
//! frame; the tally still lands on the event bus.

use std::sync::Arc;

use async_trait::async_trait;

use crate::display::{DisplayRenderer, DisplayRow};
use crate::error::TaskError;
use crate::events::{Bus, Event, EventKind};
use crate::sensors::SensorReader;
use crate::tasks::Task;

/// The read / classify / render cycle.
pub struct RefreshCycle {
    reader: Arc<dyn SensorReader>,
    renderer: Arc<dyn DisplayRenderer>,
    bus: Bus,
}

impl RefreshCycle {
    /// Creates a refresh cycle drawing through the given renderer.
    pub fn new(
        reader: Arc<dyn SensorReader>,
        renderer: Arc<dyn DisplayRenderer>,
        bus: Bus,
    ) -> Self {
        Self { reader, renderer, bus }
    }
}

#[async_trait]
impl Task for RefreshCycle {
    fn name(&self) -> &str {
        "refresh"
    }

    async fn run(&self) -> Result<(), TaskError> {
        let outcome = self.reader.read_all().await?;
        self.bus.publish(
            Event::now(EventKind::SensorsRead)
                .with_task(self.name())
                .with_counts(outcome.ok_count(), outcome.failed_count()),
        );

        let rows: Vec<DisplayRow> = outcome
            .readings
            .iter()
            .map(|(id, reading)| DisplayRow {
                sensor: id.clone(),
                value: reading.value,
                severity: reading.severity(),
            })
            .collect();

        self.renderer.render(&rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use crate::sensors::{ReadOutcome, Reading, Severity};

    struct MixedBank;

    #[async_trait]
    impl SensorReader for MixedBank {
        async fn read_all(&self) -> Result<ReadOutcome, TaskError> {
            let mut readings = BTreeMap::new();
            readings.insert(
                "freezer".to_string(),
                Reading { value: -10.0, low_limit: -25.0, high_limit: -15.0 },
            );
            readings.insert(
                "fridge".to_string(),
                Reading { value: 4.0, low_limit: 1.0, high_limit: 8.0 },
            );
            readings.insert(
                "cellar".to_string(),
                Reading { value: 2.0, low_limit: 8.0, high_limit: 14.0 },
            );
            Ok(ReadOutcome { readings, failed: Vec::new() })
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        frames: Mutex<Vec<Vec<DisplayRow>>>,
        fail: bool,
    }

    #[async_trait]
    impl DisplayRenderer for RecordingDisplay {
        async fn render(&self, rows: &[DisplayRow]) -> Result<(), TaskError> {
            if self.fail {
                return Err(TaskError::Render { error: "framebuffer gone".into() });
            }
            self.frames.lock().unwrap().push(rows.to_vec());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_rows_carry_severity_colors() {
        let bus = Bus::new(16);
        let display = Arc::new(RecordingDisplay::default());
        let cycle = RefreshCycle::new(Arc::new(MixedBank), display.clone(), bus);

        cycle.run().await.expect("refresh ok");

        let frames = display.frames.lock().unwrap();
        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        // BTreeMap order: cellar, freezer, fridge.
        assert_eq!(frame[0].severity, Severity::Cold);
        assert_eq!(frame[1].severity, Severity::Hot);
        assert_eq!(frame[2].severity, Severity::Normal);
    }

    #[tokio::test]
    async fn test_render_failure_becomes_task_error() {
        let bus = Bus::new(16);
        let display = Arc::new(RecordingDisplay { fail: true, ..Default::default() });
        let cycle = RefreshCycle::new(Arc::new(MixedBank), display, bus);

        let err = cycle.run().await.expect_err("render failure propagates");
        assert_eq!(err.as_label(), "render_failed");
    }

    #[tokio::test]
    async fn test_refresh_publishes_read_tally() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let display = Arc::new(RecordingDisplay::default());
        let cycle = RefreshCycle::new(Arc::new(MixedBank), display, bus);

        cycle.run().await.expect("refresh ok");

        let ev = rx.recv().await.expect("sensors event");
        assert_eq!(ev.kind, EventKind::SensorsRead);
        assert_eq!(ev.task.as_deref(), Some("refresh"));
        assert_eq!(ev.ok, Some(3));
    }
}
