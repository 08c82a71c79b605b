//! # Runtime configuration.
//!
//! [`Config`] centralizes every tunable of the daemon: cadences, gate retry
//! settings, shutdown grace, storage paths, alerting, and the sensor bank
//! definitions. It deserializes from a JSON file and is validated before
//! anything is spawned; a bad config is fatal by design.
//!
//! ## Field semantics
//! - `sample_period_secs` / `refresh_period_secs`: wake cadences, must be > 0
//! - `refresh_cycles`: how many foreground display refreshes the process runs
//! - `gate_max_attempts` / `gate_interval_ms`: bounded retry-then-skip knobs
//!   (worst-case wait ≈ attempts × interval)
//! - `grace_secs`: shutdown wait for an in-flight cycle
//! - `backup_every`: back the data file up every N-th sample (0 = never)
//! - `alert_recipient`: required when `alerts_enabled`; alerting is disabled
//!   (non-fatally) when the notifier cannot be built from it
//!
//! Prefer the accessor methods over raw fields; they fold the sentinel
//! values (`0`, empty) into proper `Duration`/`Option` types.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::policies::{JitterPolicy, RetryPolicy};

/// One sensor's definition: identity, alert limits, and the baseline used by
/// the simulated bank.
#[derive(Clone, Debug, Deserialize)]
pub struct SensorConfig {
    /// Stable sensor id.
    pub id: String,
    /// Lower alert limit.
    pub low_limit: f64,
    /// Upper alert limit.
    pub high_limit: f64,
    /// Baseline value for simulated readings.
    #[serde(default)]
    pub baseline: f64,
}

/// Global configuration for the daemon.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sampling cadence in seconds (read / alert / store / backup).
    pub sample_period_secs: u64,
    /// Display refresh cadence in seconds.
    pub refresh_period_secs: u64,
    /// Number of foreground refresh cycles before the process stops.
    pub refresh_cycles: u32,
    /// Gate acquisition attempts before a cycle is skipped.
    pub gate_max_attempts: u32,
    /// Sleep between failed gate attempts, in milliseconds.
    pub gate_interval_ms: u64,
    /// Shutdown grace window in seconds.
    pub grace_secs: u64,
    /// Event bus ring buffer capacity.
    pub bus_capacity: usize,
    /// Path of the JSONL data file.
    pub data_path: PathBuf,
    /// Back the data file up every N-th sample cycle (0 = never).
    pub backup_every: u32,
    /// Whether out-of-limit and failure alerts are wanted at all.
    pub alerts_enabled: bool,
    /// Where alerts go; required when alerting is enabled.
    pub alert_recipient: Option<String>,
    /// The sensor bank.
    pub sensors: Vec<SensorConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_period_secs: 15,
            refresh_period_secs: 5,
            refresh_cycles: 3,
            gate_max_attempts: 10,
            gate_interval_ms: 500,
            grace_secs: 5,
            bus_capacity: 1024,
            data_path: PathBuf::from("data/readings.jsonl"),
            backup_every: 96,
            alerts_enabled: true,
            alert_recipient: Some("ops@localhost".to_string()),
            sensors: vec![
                SensorConfig {
                    id: "freezer".into(),
                    low_limit: -25.0,
                    high_limit: -15.0,
                    baseline: -20.0,
                },
                SensorConfig {
                    id: "fridge-freezer".into(),
                    low_limit: -20.0,
                    high_limit: -10.0,
                    baseline: -16.0,
                },
                SensorConfig {
                    id: "fridge".into(),
                    low_limit: 1.0,
                    high_limit: 8.0,
                    baseline: 4.0,
                },
            ],
        }
    }
}

impl Config {
    /// Loads and validates a config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let cfg: Config = serde_json::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects configurations that describe an invalid runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_period_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "sample_period_secs",
                reason: "period must be positive".into(),
            });
        }
        if self.refresh_period_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "refresh_period_secs",
                reason: "period must be positive".into(),
            });
        }
        if self.gate_max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "gate_max_attempts",
                reason: "at least one acquisition attempt is required".into(),
            });
        }
        if self.sensors.is_empty() {
            return Err(ConfigError::Invalid {
                field: "sensors",
                reason: "at least one sensor must be configured".into(),
            });
        }
        Ok(())
    }

    /// Sampling cadence as a `Duration`.
    #[inline]
    pub fn sample_period(&self) -> Duration {
        Duration::from_secs(self.sample_period_secs)
    }

    /// Refresh cadence as a `Duration`.
    #[inline]
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_period_secs)
    }

    /// Shutdown grace window as a `Duration`.
    #[inline]
    pub fn grace(&self) -> Duration {
        Duration::from_secs(self.grace_secs)
    }

    /// Gate retry knobs as a [`RetryPolicy`].
    #[inline]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.gate_max_attempts,
            interval: Duration::from_millis(self.gate_interval_ms),
            jitter: JitterPolicy::None,
        }
    }

    /// Backup cadence with the `0 = never` sentinel folded away.
    #[inline]
    pub fn backup_cadence(&self) -> Option<u32> {
        if self.backup_every == 0 {
            None
        } else {
            Some(self.backup_every)
        }
    }
}
