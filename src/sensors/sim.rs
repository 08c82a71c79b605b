//! # Simulated sensor bank.
//!
//! [`SimReader`] produces plausible readings without any hardware: each
//! sensor starts at its baseline and drifts by a small random step per sweep,
//! clamped to a window around the baseline. Used by the daemon by default and
//! by demos; real deployments put a driver-backed [`SensorReader`] behind the
//! same trait.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rand::Rng;

use crate::error::TaskError;
use crate::sensors::reader::SensorReader;
use crate::sensors::reading::{ReadOutcome, Reading};

/// How far a simulated value may drift from its baseline.
const DRIFT_WINDOW: f64 = 5.0;
/// Largest per-sweep step.
const DRIFT_STEP: f64 = 0.4;

/// Definition of one simulated sensor.
#[derive(Clone, Debug)]
pub struct SimSensor {
    /// Sensor id (stable key for persistence and display).
    pub id: String,
    /// Lower alert limit.
    pub low_limit: f64,
    /// Upper alert limit.
    pub high_limit: f64,
    /// Starting value for the drift walk.
    pub baseline: f64,
}

/// Hardware-free sensor bank.
pub struct SimReader {
    sensors: Vec<SimSensor>,
    values: Mutex<BTreeMap<String, f64>>,
}

impl SimReader {
    /// Creates a bank from the given sensor definitions.
    pub fn new(sensors: Vec<SimSensor>) -> Self {
        let values = sensors
            .iter()
            .map(|s| (s.id.clone(), s.baseline))
            .collect();
        Self {
            sensors,
            values: Mutex::new(values),
        }
    }
}

#[async_trait]
impl SensorReader for SimReader {
    async fn read_all(&self) -> Result<ReadOutcome, TaskError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| TaskError::Sensors { error: e.to_string() })?;

        let mut outcome = ReadOutcome::default();
        let mut rng = rand::rng();
        for sensor in &self.sensors {
            let current = values.entry(sensor.id.clone()).or_insert(sensor.baseline);
            let next = *current + rng.random_range(-DRIFT_STEP..=DRIFT_STEP);
            *current = next.clamp(
                sensor.baseline - DRIFT_WINDOW,
                sensor.baseline + DRIFT_WINDOW,
            );
            outcome.readings.insert(
                sensor.id.clone(),
                Reading {
                    value: *current,
                    low_limit: sensor.low_limit,
                    high_limit: sensor.high_limit,
                },
            );
        }
        Ok(outcome)
    }
}
