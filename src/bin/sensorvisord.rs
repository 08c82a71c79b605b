//! # sensorvisord: the sampling daemon.
//!
//! Wires the engine to the shipped collaborators:
//! 1. loads configuration (a path may be given as the first argument; fatal
//!    failure terminates immediately),
//! 2. builds the shared stop signal, gate, and event bus,
//! 3. spawns the slow-cadence sample timer in the background,
//! 4. runs a bounded number of fast-cadence display refreshes in the
//!    foreground through the same gate,
//! 5. stops everything and waits out the grace window.
//!
//! OS termination signals fire the same stop signal the foreground loop
//! uses, so Ctrl-C winds the whole process down cleanly. The process exits
//! with status 0 on every path.

use std::process::exit;
use std::sync::Arc;

use sensorvisor::{
    AlertWriter, Bus, Config, ConsoleDisplay, CycleGate, CycleTimer, InitError, JsonlSink,
    LogNotifier, LogWriter, Notifier, RefreshCycle, SampleCycle, SimReader, SimSensor,
    StopSignal, Subscribe, SubscriberSet, stop_on_signal, run_guarded, wait_with_grace,
};

/// Builds the notifier, or explains why alerting stays off.
///
/// Alerting is an optional feature: a misconfigured notifier is logged and
/// disabled, never fatal.
fn build_notifier(cfg: &Config) -> Result<Arc<dyn Notifier>, InitError> {
    if !cfg.alerts_enabled {
        return Err(InitError::Unavailable {
            collaborator: "notifier",
            reason: "alerts disabled in config".into(),
        });
    }
    match &cfg.alert_recipient {
        Some(_recipient) => Ok(Arc::new(LogNotifier)),
        None => Err(InitError::Unavailable {
            collaborator: "notifier",
            reason: "alerts enabled but no recipient configured".into(),
        }),
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    // Fatal configuration loading, before anything is spawned. With no path
    // argument the built-in defaults apply (simulated bank, local data dir).
    let cfg = match std::env::args().nth(1) {
        Some(path) => match Config::from_path(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("sensorvisord: {e}");
                exit(0);
            }
        },
        None => Config::default(),
    };

    let stop = StopSignal::new();
    let gate = CycleGate::new();
    let bus = Bus::new(cfg.bus_capacity);
    let retry = cfg.retry_policy();

    let notifier = match build_notifier(&cfg) {
        Ok(n) => Some(n),
        Err(e) => {
            eprintln!("sensorvisord: {e}; continuing without alerts");
            None
        }
    };

    let mut subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
    if let Some(n) = &notifier {
        subs.push(Arc::new(AlertWriter::new(n.clone())));
    }
    let subs = Arc::new(SubscriberSet::new(subs));

    // Bus listener: fan incoming events out to the subscribers.
    {
        let mut rx = bus.subscribe();
        let subs = Arc::clone(&subs);
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                subs.emit(&ev);
            }
        });
    }

    stop_on_signal(stop.clone(), bus.clone());

    let reader = Arc::new(SimReader::new(
        cfg.sensors
            .iter()
            .map(|s| SimSensor {
                id: s.id.clone(),
                low_limit: s.low_limit,
                high_limit: s.high_limit,
                baseline: s.baseline,
            })
            .collect(),
    ));
    let sink = match JsonlSink::new(&cfg.data_path) {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            eprintln!("sensorvisord: cannot open data path: {e}");
            exit(0);
        }
    };

    let mut sample = SampleCycle::new(reader.clone(), sink, bus.clone());
    if let Some(n) = notifier {
        sample = sample.with_notifier(n);
    }
    if let Some(every) = cfg.backup_cadence() {
        sample = sample.with_backup_every(every);
    }

    let sampler = match CycleTimer::new(
        Arc::new(sample),
        cfg.sample_period(),
        stop.clone(),
        gate.clone(),
        retry,
        bus.clone(),
    ) {
        Ok(timer) => timer,
        Err(e) => {
            eprintln!("sensorvisord: {e}");
            exit(0);
        }
    };
    let sampler_handle = sampler.spawn();

    // Foreground: a bounded number of display refreshes through the same
    // gate, paced by the shared stop signal.
    let refresh = RefreshCycle::new(reader, Arc::new(ConsoleDisplay), bus.clone());
    for _ in 0..cfg.refresh_cycles {
        if stop.wait_for(cfg.refresh_period()).await {
            break;
        }
        run_guarded(&refresh, &gate, &retry, &bus).await;
    }

    stop.set();
    if let Err(e) = wait_with_grace(vec![sampler_handle], cfg.grace(), &bus).await {
        eprintln!("sensorvisord: {e}");
    }

    // Give the subscriber workers a moment to drain their queues.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
}
