//! # Persistence of sensor sweeps.
//!
//! [`PersistenceSink`] is the storage contract the sample cycle writes
//! through. [`JsonlSink`] is the shipped implementation: one JSON record per
//! sweep, appended to a single `.jsonl` file, with on-demand timestamped
//! backup copies. Append-only keeps a crashed cycle from corrupting earlier
//! records.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TaskError;
use crate::sensors::ReadOutcome;

/// # Contract for persisting sensor sweeps.
///
/// Failures surface as [`TaskError::Store`]; the guarded runner contains
/// them, so a broken disk costs cycles, never the engine.
#[async_trait]
pub trait PersistenceSink: Send + Sync + 'static {
    /// Persists one sweep.
    async fn store(&self, outcome: &ReadOutcome) -> Result<(), TaskError>;

    /// Writes a backup copy of everything persisted so far.
    async fn backup(&self) -> Result<(), TaskError>;
}

/// One persisted sweep: wall-clock time plus the outcome verbatim.
#[derive(Debug, Serialize, Deserialize)]
pub struct SweepRecord {
    /// Seconds since the Unix epoch when the sweep was persisted.
    pub at: u64,
    /// The sweep itself.
    #[serde(flatten)]
    pub outcome: ReadOutcome,
}

/// Append-only JSONL persistence.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Creates a sink writing to `path`, creating parent directories as
    /// needed.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    /// Path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads back every persisted record. Intended for inspection and tests;
    /// the hot path only ever appends.
    pub fn records(&self) -> Result<Vec<SweepRecord>, TaskError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path).map_err(|e| TaskError::Store { error: e.to_string() })?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| TaskError::Store { error: e.to_string() })?;
            if line.trim().is_empty() {
                continue;
            }
            let record: SweepRecord =
                serde_json::from_str(&line).map_err(|e| TaskError::Store { error: e.to_string() })?;
            records.push(record);
        }
        Ok(records)
    }

    fn backup_path(&self, at: u64) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "readings".to_string());
        self.path.with_file_name(format!("{stem}-{at}.jsonl"))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[async_trait]
impl PersistenceSink for JsonlSink {
    async fn store(&self, outcome: &ReadOutcome) -> Result<(), TaskError> {
        let record = SweepRecord {
            at: unix_now(),
            outcome: outcome.clone(),
        };
        let line =
            serde_json::to_string(&record).map_err(|e| TaskError::Store { error: e.to_string() })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| TaskError::Store { error: e.to_string() })?;
        writeln!(file, "{line}").map_err(|e| TaskError::Store { error: e.to_string() })?;
        Ok(())
    }

    async fn backup(&self) -> Result<(), TaskError> {
        if !self.path.exists() {
            // Nothing persisted yet; nothing to back up.
            return Ok(());
        }
        let target = self.backup_path(unix_now());
        fs::copy(&self.path, &target).map_err(|e| TaskError::Store { error: e.to_string() })?;
        Ok(())
    }
}
