use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type used across the crate.
pub type UtilsResult<T> = Result<T, UtilsError>;

/// Error type shared by row sources, the configuration supplier and the credential helpers.
///
/// Key-set operations and scalar coercion are total and never produce one of these.
#[derive(Debug, Error)]
pub enum UtilsError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Parquet reader error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// JSON decoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The row shape (ordered column list) could not be determined.
    #[error("column list unavailable: {message}")]
    ColumnList { message: String },

    /// A single row failed to materialize. `row` is 1-based.
    #[error("failed to read row {row}: {message}")]
    RowRead { row: usize, message: String },

    /// A configuration file was missing, unreadable or malformed.
    #[error("failed to load config '{}': {message}", path.display())]
    ConfigLoad { path: PathBuf, message: String },

    /// Password hashing failed.
    #[error("hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}
