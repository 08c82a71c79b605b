//! # Task abstraction for cycle bodies.
//!
//! This module defines the [`Task`] trait, the argument-less unit of work a
//! [`CycleTimer`](crate::CycleTimer) invokes once per period. The common
//! handle type is [`TaskRef`], an `Arc<dyn Task>` suitable for sharing across
//! the runtime.
//!
//! A task receives nothing and returns `Result<(), TaskError>`. Cancellation
//! is deliberately not delivered here: the stop signal is observed at the
//! timer's wait boundary only, and a body that has started always runs to
//! completion. Tasks that need shared state own it via `Arc` fields.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TaskError;

/// Shared handle to a task.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, fallible cycle body.
///
/// A `Task` has a stable [`name`](Task::name) and an async [`run`](Task::run)
/// method. Errors returned from `run` are contained by the guarded runner and
/// reported on the event bus; they never stop the owning timer.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use sensorvisor::{Task, TaskError};
///
/// struct Demo;
///
/// #[async_trait]
/// impl Task for Demo {
///     fn name(&self) -> &str { "demo" }
///
///     async fn run(&self) -> Result<(), TaskError> {
///         // do work...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes one cycle body to completion.
    async fn run(&self) -> Result<(), TaskError>;
}
