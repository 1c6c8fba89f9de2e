//! Logging sinks.
//!
//! Components that can fail without surfacing an error (the row normalizer and the
//! configuration supplier) report to an explicitly passed [`LogSink`] instead of a
//! process-wide logger. Sinks are plain values, so tests can construct their own.

use std::error::Error as StdError;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{UtilsError, UtilsResult};

/// Log file used by [`FileSink::open`] when given an empty path.
pub const DEFAULT_LOG_PATH: &str = "./logs/app.log";

/// Severity classification attached to every failure event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Non-fatal; work continued (e.g. one row skipped).
    Warning,
    /// The operation produced no result.
    Error,
    /// I/O or other infrastructure failure.
    Critical,
}

/// Which operation emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Normalize,
    LoadConfig,
}

/// Context about the operation reporting an event.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub operation: Operation,
    /// Human-readable name of the input (a path, or a source label).
    pub source: String,
}

impl LogContext {
    pub fn new(operation: Operation, source: impl Into<String>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }
}

/// Stats reported when a normalization pass finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Records produced.
    pub rows: usize,
    /// Rows that failed to read and were skipped.
    pub skipped: usize,
}

/// Destination for operational events.
pub trait LogSink: Send + Sync {
    /// Called when a normalization pass completes.
    fn on_success(&self, _ctx: &LogContext, _stats: NormalizeStats) {}

    /// Called once per failure.
    fn on_failure(&self, _ctx: &LogContext, _severity: Severity, _error: &UtilsError) {}
}

/// Report every present error to `sink`; `None` entries are skipped.
pub fn log_errors<'a, I>(sink: &dyn LogSink, ctx: &LogContext, errors: I)
where
    I: IntoIterator<Item = Option<&'a UtilsError>>,
{
    for err in errors.into_iter().flatten() {
        sink.on_failure(ctx, severity_for_error(err), err);
    }
}

/// Classify an error for logging.
pub fn severity_for_error(e: &UtilsError) -> Severity {
    match e {
        UtilsError::Io(_) => Severity::Critical,
        UtilsError::Parquet(err) => {
            if error_chain_contains_io(err) {
                Severity::Critical
            } else {
                Severity::Error
            }
        }
        UtilsError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        UtilsError::RowRead { .. } => Severity::Warning,
        UtilsError::Json(_)
        | UtilsError::ColumnList { .. }
        | UtilsError::ConfigLoad { .. }
        | UtilsError::Hash(_) => Severity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

/// Fans events out to a list of sinks.
#[derive(Default)]
pub struct CompositeSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl CompositeSink {
    pub fn new(sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self { sinks }
    }
}

impl fmt::Debug for CompositeSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeSink")
            .field("sinks_len", &self.sinks.len())
            .finish()
    }
}

impl LogSink for CompositeSink {
    fn on_success(&self, ctx: &LogContext, stats: NormalizeStats) {
        for s in &self.sinks {
            s.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LogContext, severity: Severity, error: &UtilsError) {
        for s in &self.sinks {
            s.on_failure(ctx, severity, error);
        }
    }
}

/// Writes events to stderr.
#[derive(Debug, Default)]
pub struct StdErrSink;

impl LogSink for StdErrSink {
    fn on_success(&self, ctx: &LogContext, stats: NormalizeStats) {
        eprintln!(
            "[{:?}][ok] source={} rows={} skipped={}",
            ctx.operation, ctx.source, stats.rows, stats.skipped
        );
    }

    fn on_failure(&self, ctx: &LogContext, severity: Severity, error: &UtilsError) {
        eprintln!(
            "[{:?}][{:?}] source={} err={}",
            ctx.operation, severity, ctx.source, error
        );
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn on_success(&self, ctx: &LogContext, stats: NormalizeStats) {
        tracing::info!(
            operation = ?ctx.operation,
            source = %ctx.source,
            rows = stats.rows,
            skipped = stats.skipped,
            "completed"
        );
    }

    fn on_failure(&self, ctx: &LogContext, severity: Severity, error: &UtilsError) {
        match severity {
            Severity::Warning => {
                tracing::warn!(operation = ?ctx.operation, source = %ctx.source, %error, "failure")
            }
            Severity::Error | Severity::Critical => tracing::error!(
                operation = ?ctx.operation,
                source = %ctx.source,
                ?severity,
                %error,
                "failure"
            ),
        }
    }
}

/// Appends one plain text line per event to a log file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Open (creating if needed) `path` for appending. An empty path means
    /// [`DEFAULT_LOG_PATH`]. Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> UtilsResult<Self> {
        let path = path.as_ref();
        let path = if path.as_os_str().is_empty() {
            Path::new(DEFAULT_LOG_PATH)
        } else {
            path
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // Best-effort: a failed write must not turn into a failure of the caller.
    fn append_line(&self, line: &str) {
        if let Ok(mut f) = self.file.lock() {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl LogSink for FileSink {
    fn on_success(&self, ctx: &LogContext, stats: NormalizeStats) {
        self.append_line(&format!(
            "{} ok op={:?} source={} rows={} skipped={}",
            unix_ts(),
            ctx.operation,
            ctx.source,
            stats.rows,
            stats.skipped
        ));
    }

    fn on_failure(&self, ctx: &LogContext, severity: Severity, error: &UtilsError) {
        self.append_line(&format!(
            "{} fail severity={:?} op={:?} source={} err={}",
            unix_ts(),
            severity,
            ctx.operation,
            ctx.source,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
