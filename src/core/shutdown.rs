//! # Cross-platform OS signal handling.
//!
//! The process's external stop trigger: when a termination signal arrives,
//! the shared [`StopSignal`] is set and every timer winds down at its next
//! wait boundary. [`wait_for_shutdown_signal`] is the raw wait;
//! [`stop_on_signal`] wires it to a signal/bus pair in the background.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` (quit signal, often used for core dumps or hard stop)
//!
//! **Windows platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]

use tokio::task::JoinHandle;

use crate::core::stop::StopSignal;
use crate::events::{Bus, Event, EventKind};

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners.
///
/// Returns `Ok(())` when any signal is received, or `Err` if signal
/// registration fails.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = sigint.recv()  => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
    Ok(())
}

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners.
///
/// Returns `Ok(())` when any signal is received, or `Err` if signal
/// registration fails.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Spawns a watcher that fires the stop signal when the OS asks the process
/// to terminate.
///
/// Publishes [`EventKind::ShutdownRequested`] before setting the signal. If
/// signal registration fails the watcher exits without arming anything; the
/// foreground loop's own bounded run still ends the process.
pub fn stop_on_signal(stop: StopSignal, bus: Bus) -> JoinHandle<()> {
    tokio::spawn(async move {
        if wait_for_shutdown_signal().await.is_ok() {
            bus.publish(Event::now(EventKind::ShutdownRequested));
            stop.set();
        }
    })
}
