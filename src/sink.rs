//! Destinations for file-scoped errors.
//!
//! The pipeline never aborts a batch on error; it hands each failure to an
//! `ErrorSink` together with the name of the file it came from. Sinks take `&self`
//! and serialize internally, so one sink can be shared by parallel workers.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{error, warn};

pub trait ErrorSink: Send + Sync {
    fn record(&self, file: &str, error: &PipelineError);
}

impl<S: ErrorSink + ?Sized> ErrorSink for &S {
    fn record(&self, file: &str, error: &PipelineError) {
        (**self).record(file, error)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub file: String,
    pub error: PipelineError,
}

impl ErrorRecord {
    /// The log line for this record.
    pub fn message(&self) -> String {
        format!("Error processing file {}: {}", self.file, self.error)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic while holding the lock cannot leave a half-written record behind.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Keeps every record in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<ErrorRecord>>,
}

impl MemorySink {
    pub fn new() -> Self { Self::default() }

    pub fn records(&self) -> Vec<ErrorRecord> {
        lock(&self.records).clone()
    }

    pub fn len(&self) -> usize { lock(&self.records).len() }
    pub fn is_empty(&self) -> bool { lock(&self.records).is_empty() }
}

impl ErrorSink for MemorySink {
    fn record(&self, file: &str, error: &PipelineError) {
        lock(&self.records).push(ErrorRecord { file: file.to_string(), error: error.clone() });
    }
}

/// Appends one line per record to a text file.
#[derive(Debug)]
pub struct LogFileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogFileSink {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file: Mutex::new(file) })
    }

    /// The log named by `config.error_log`, if one is configured.
    pub fn from_config(config: &PipelineConfig) -> io::Result<Option<Self>> {
        config.error_log.as_ref().map(Self::open).transpose()
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl ErrorSink for LogFileSink {
    fn record(&self, file: &str, error: &PipelineError) {
        let record = ErrorRecord { file: file.to_string(), error: error.clone() };
        let mut handle = lock(&self.file);
        if let Err(e) = writeln!(handle, "{}", record.message()) {
            warn!(path = %self.path.display(), error = %e, "failed to append to error log");
        }
    }
}

/// Emits each record as a `tracing` error event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn record(&self, file: &str, error: &PipelineError) {
        error!(file, %error, "processing failed");
    }
}
