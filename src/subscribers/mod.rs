//! # Event subscribers for the sensorvisor runtime.
//!
//! This module provides the [`Subscribe`] trait and built-in implementations
//! for handling runtime events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   timers/runner/cycles ── publish(Event) ──► Bus ──► bus listener
//!                                                          │
//!                                                   SubscriberSet::emit
//!                                                 ┌────────┴────────┐
//!                                                 ▼                 ▼
//!                                            [queue S1]        [queue S2]
//!                                                 │                 │
//!                                             worker S1         worker S2
//!                                                 ▼                 ▼
//!                                          LogWriter.on_event  AlertWriter.on_event
//! ```
//!
//! ## Built-ins
//! - [`LogWriter`] - human-readable event lines on stdout
//! - [`AlertWriter`] - forwards failures to the [`Notifier`](crate::Notifier)

mod alert;
mod log;
mod set;
mod subscribe;

pub use alert::AlertWriter;
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
