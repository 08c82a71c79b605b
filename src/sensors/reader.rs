//! # Reader contract for the sensor bank.

use async_trait::async_trait;

use crate::error::TaskError;
use crate::sensors::reading::ReadOutcome;

/// # Contract for reading the whole sensor bank in one sweep.
///
/// An individual sensor failing is **not** an error: the implementation
/// records its id in [`ReadOutcome::failed`] and keeps sweeping. Only total
/// unavailability of the bank (bus gone, driver missing) returns
/// [`TaskError::Sensors`].
#[async_trait]
pub trait SensorReader: Send + Sync + 'static {
    /// Reads every configured sensor once.
    async fn read_all(&self) -> Result<ReadOutcome, TaskError>;
}
