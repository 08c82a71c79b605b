//! # Status display rendering.
//!
//! [`DisplayRenderer`] is the contract the fast-cadence refresh cycle draws
//! through: one row per sensor, carrying the value and its limit
//! classification. [`ConsoleDisplay`] renders to the terminal with the
//! classic color coding: hot readings red, cold readings blue, everything in
//! range green.

use std::io::Write;

use async_trait::async_trait;
use colored::Colorize;

use crate::error::TaskError;
use crate::sensors::Severity;

/// One display row: a sensor and its judged reading.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayRow {
    /// Sensor id.
    pub sensor: String,
    /// Measured value.
    pub value: f64,
    /// Limit classification driving the color.
    pub severity: Severity,
}

/// # Contract for rendering a refresh frame.
#[async_trait]
pub trait DisplayRenderer: Send + Sync + 'static {
    /// Draws one frame from the given rows.
    async fn render(&self, rows: &[DisplayRow]) -> Result<(), TaskError>;
}

/// Terminal renderer with severity coloring.
pub struct ConsoleDisplay;

impl ConsoleDisplay {
    fn paint(row: &DisplayRow) -> String {
        let value = format!("{:>8.2}", row.value);
        let painted = match row.severity {
            Severity::Hot => value.red(),
            Severity::Cold => value.blue(),
            Severity::Normal => value.green(),
        };
        format!("{:<16} {painted}", row.sensor)
    }
}

#[async_trait]
impl DisplayRenderer for ConsoleDisplay {
    async fn render(&self, rows: &[DisplayRow]) -> Result<(), TaskError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for row in rows {
            writeln!(out, "{}", Self::paint(row))
                .map_err(|e| TaskError::Render { error: e.to_string() })?;
        }
        writeln!(out).map_err(|e| TaskError::Render { error: e.to_string() })?;
        Ok(())
    }
}
