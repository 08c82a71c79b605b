//! Error types used by the sensorvisor runtime and its cycle tasks.
//!
//! The taxonomy separates failures by how far they are allowed to travel:
//!
//! - [`ConfigError`] — fatal; raised before any timer starts and terminates
//!   the process.
//! - [`InitError`] — a non-fatal collaborator construction failure (e.g. the
//!   notifier); the feature is disabled and execution continues.
//! - [`TaskError`] — raised inside a cycle body; contained by the guarded
//!   runner, the cycle counts as failed, the engine continues.
//! - [`RuntimeError`] — raised by the engine itself: the gate stayed busy
//!   through every retry, or shutdown overran its grace window.
//!
//! Per-sensor read failures are deliberately *not* errors: readers collect
//! them into [`ReadOutcome::failed`](crate::sensors::ReadOutcome) and they
//! are surfaced as a count. Only total reader unavailability becomes a
//! [`TaskError::Sensors`].
//!
//! All enums provide `as_label()` (stable snake_case, for events/metrics) and
//! `as_message()` (human-readable detail).

use std::time::Duration;
use thiserror::Error;

/// # Fatal configuration errors.
///
/// Anything here means the process cannot meaningfully start: the config file
/// is unreadable, unparsable, or describes an invalid runtime (for example a
/// zero sampling period).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field value describes an invalid runtime.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value is rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "config_io",
            ConfigError::Parse(_) => "config_parse",
            ConfigError::Invalid { .. } => "config_invalid",
        }
    }
}

/// # Non-fatal collaborator initialization errors.
///
/// Construction of an *optional* collaborator failed. The caller logs the
/// error, runs without that feature, and keeps going. Used by the notifier:
/// sampling and persistence must not die because alerting is misconfigured.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum InitError {
    /// The collaborator could not be constructed.
    #[error("{collaborator} unavailable: {reason}")]
    Unavailable {
        /// Which collaborator failed to come up.
        collaborator: &'static str,
        /// Construction failure detail.
        reason: String,
    },
}

impl InitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            InitError::Unavailable { .. } => "init_unavailable",
        }
    }
}

/// # Errors raised inside a cycle body.
///
/// These are contained by the guarded runner: the cycle is reported as failed
/// on the event bus and the timer simply waits for its next period. No
/// variant here ever propagates out of the engine.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// The sensor reader was entirely unavailable (not a per-sensor failure).
    #[error("sensor bank unavailable: {error}")]
    Sensors {
        /// The underlying reader error.
        error: String,
    },

    /// The persistence sink rejected the readings.
    #[error("failed to persist readings: {error}")]
    Store {
        /// The underlying sink error.
        error: String,
    },

    /// The display renderer failed to draw the refresh frame.
    #[error("failed to render display: {error}")]
    Render {
        /// The underlying renderer error.
        error: String,
    },

    /// Any other cycle failure.
    #[error("cycle failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },
}

impl TaskError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use sensorvisor::TaskError;
    ///
    /// let err = TaskError::Store { error: "disk full".into() };
    /// assert_eq!(err.as_label(), "store_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Sensors { .. } => "sensors_unavailable",
            TaskError::Store { .. } => "store_failed",
            TaskError::Render { .. } => "render_failed",
            TaskError::Fail { .. } => "cycle_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Sensors { error } => format!("sensors: {error}"),
            TaskError::Store { error } => format!("store: {error}"),
            TaskError::Render { error } => format!("render: {error}"),
            TaskError::Fail { error } => format!("error: {error}"),
        }
    }
}

/// # Errors produced by the engine itself.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The gate stayed held through every acquisition attempt; the cycle is
    /// skipped rather than blocked indefinitely.
    #[error("gate busy after {attempts} attempts; skipping cycle")]
    GateBusy {
        /// How many acquisition attempts were made.
        attempts: u32,
    },

    /// Shutdown grace window was exceeded; a cycle was still running when the
    /// process gave up waiting.
    #[error("shutdown grace {grace:?} exceeded; a cycle is still running")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use sensorvisor::RuntimeError;
    ///
    /// let err = RuntimeError::GateBusy { attempts: 10 };
    /// assert_eq!(err.as_label(), "gate_busy");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GateBusy { .. } => "gate_busy",
            RuntimeError::GraceExceeded { .. } => "grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GateBusy { attempts } => {
                format!("gate busy after {attempts} attempts")
            }
            RuntimeError::GraceExceeded { grace } => {
                format!("grace exceeded after {grace:?}")
            }
        }
    }
}
