//! Row sources and the row normalizer.
//!
//! Most callers use [`normalize`] with any [`RowSource`], or [`normalize_path`] to pick a
//! source from a file extension. Built-in sources:
//! - [`memory`]: caller-built rows
//! - [`csv`]
//! - [`json`]
//! - [`parquet`]

pub mod csv;
pub mod json;
pub mod memory;
pub mod normalize;
pub mod parquet;
pub mod source;
pub mod unified;

pub use self::csv::CsvRowSource;
pub use self::json::JsonRowSource;
pub use self::memory::MemoryRowSource;
pub use self::normalize::{Records, normalize, records};
pub use self::parquet::ParquetRowSource;
pub use self::source::RowSource;
pub use self::unified::{NormalizeOptions, RowFormat, normalize_path, open_path};
