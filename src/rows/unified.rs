//! Path-based entrypoint.
//!
//! [`normalize_path`] picks a row source from the file extension (or
//! [`NormalizeOptions::format`]) and normalizes it, reporting to the configured sink.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{UtilsError, UtilsResult};
use crate::logging::{LogContext, LogSink, Operation, TracingSink, severity_for_error};
use crate::types::Record;

use super::csv::CsvRowSource;
use super::json::JsonRowSource;
use super::normalize::normalize;
use super::parquet::ParquetRowSource;
use super::source::RowSource;

/// File formats with a built-in row source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
    Parquet,
}

impl RowFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            "parquet" | "pq" => Some(Self::Parquet),
            _ => None,
        }
    }
}

/// Options for [`normalize_path`].
#[derive(Clone)]
pub struct NormalizeOptions {
    /// If `None`, inferred from the file extension.
    pub format: Option<RowFormat>,
    /// CSV only: read empty cells as nulls.
    pub csv_empty_as_null: bool,
    pub sink: Arc<dyn LogSink>,
}

impl fmt::Debug for NormalizeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizeOptions")
            .field("format", &self.format)
            .field("csv_empty_as_null", &self.csv_empty_as_null)
            .finish_non_exhaustive()
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            format: None,
            csv_empty_as_null: false,
            sink: Arc::new(TracingSink),
        }
    }
}

/// Open the row source for `path`.
pub fn open_path(
    path: impl AsRef<Path>,
    options: &NormalizeOptions,
) -> UtilsResult<Box<dyn RowSource>> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };
    let source: Box<dyn RowSource> = match format {
        RowFormat::Csv => {
            Box::new(CsvRowSource::from_path(path)?.empty_as_null(options.csv_empty_as_null))
        }
        RowFormat::Json => Box::new(JsonRowSource::from_path(path)?),
        RowFormat::Parquet => Box::new(ParquetRowSource::from_path(path)?),
    };
    Ok(source)
}

/// Normalize the rows stored at `path`.
///
/// A file that cannot be opened yields no records and one logged failure, like a column-list
/// failure.
pub fn normalize_path(path: impl AsRef<Path>, options: &NormalizeOptions) -> Vec<Record> {
    let path = path.as_ref();
    let sink = options.sink.as_ref();
    match open_path(path, options) {
        Ok(mut source) => normalize(&mut source, sink),
        Err(e) => {
            let ctx = LogContext::new(Operation::Normalize, path.display().to_string());
            sink.on_failure(&ctx, severity_for_error(&e), &e);
            Vec::new()
        }
    }
}

fn infer_format_from_path(path: &Path) -> UtilsResult<RowFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| UtilsError::ColumnList {
            message: format!("cannot infer format: path has no extension ({})", path.display()),
        })?;

    RowFormat::from_extension(ext).ok_or_else(|| UtilsError::ColumnList {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}
