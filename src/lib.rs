//! `service-utils` is a small library of stateless helpers for backend services.
//!
//! ## What it covers
//!
//! - [`keys`]: key-set reconciliation over `HashMap<String, String>` ([`types::StringMap`]):
//!   key/value extraction, length-gated key comparison, subset checks, key exclusion.
//! - [`rows`]: turns loosely-typed tabular rows (from any [`rows::RowSource`]: in-memory, CSV,
//!   JSON/NDJSON, Parquet) into uniform [`types::Record`]s, coercing each cell through
//!   [`coerce::coerce`] and omitting null cells.
//! - [`logging`]: explicit log sinks (file, stderr, `tracing`) that the normalizer and the
//!   configuration loader report to instead of failing.
//! - [`config`]: `.env` files into a [`types::StringMap`].
//! - [`validate`] and [`text`]: email-shape checks, bcrypt password hashing, string helpers.
//!
//! Every operation is a pure transform over its inputs; nothing is cached between calls.
//!
//! ## Normalizing rows
//!
//! ```rust
//! use service_utils::logging::TracingSink;
//! use service_utils::rows::{normalize, MemoryRowSource};
//! use service_utils::types::{RawValue, Value};
//!
//! let mut src = MemoryRowSource::new(
//!     ["id", "active", "payload"],
//!     vec![
//!         vec![RawValue::from(1_i32), RawValue::from(true), RawValue::from(b"hi".to_vec())],
//!         vec![RawValue::from(2_i32), RawValue::Null, RawValue::from("")],
//!     ],
//! );
//!
//! let records = normalize(&mut src, &TracingSink);
//! assert_eq!(records[0]["id"], Value::Int64(1));
//! assert_eq!(records[0]["payload"], Value::Text("hi".to_string()));
//! // Nulls are omitted; empty text is kept.
//! assert!(!records[1].contains_key("active"));
//! assert_eq!(records[1]["payload"], Value::Text(String::new()));
//! ```
//!
//! ## Reading a file
//!
//! ```no_run
//! use service_utils::rows::{normalize_path, NormalizeOptions};
//!
//! // Format is inferred from the extension (.csv/.json/.ndjson/.parquet/.pq).
//! let records = normalize_path("export.parquet", &NormalizeOptions::default());
//! println!("{}", serde_json::to_string(&records).unwrap());
//! ```
//!
//! ## Failure handling
//!
//! Key-set operations and coercion cannot fail. The normalizer logs and skips rows that fail to
//! read, and returns no records at all if the column list cannot be read. The configuration
//! loader returns an empty map on failure. In each case the failure goes to the
//! [`logging::LogSink`] passed in by the caller.

pub mod coerce;
pub mod config;
pub mod error;
pub mod keys;
pub mod logging;
pub mod rows;
pub mod text;
pub mod types;
pub mod validate;

pub use error::{UtilsError, UtilsResult};
