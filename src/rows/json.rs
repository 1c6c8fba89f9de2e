//! JSON row source.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Columns are the keys of the first object (in `serde_json` map order). Keys missing from
//! later objects read as null; keys only present in later objects are ignored.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use crate::error::{UtilsError, UtilsResult};
use crate::types::RawValue;

use super::source::RowSource;

/// Row source over JSON objects.
#[derive(Debug, Clone)]
pub struct JsonRowSource {
    items: VecDeque<Result<serde_json::Value, String>>,
    columns: Option<Vec<String>>,
    label: String,
    position: usize,
}

impl JsonRowSource {
    /// Read a JSON or NDJSON file.
    pub fn from_path(path: impl AsRef<Path>) -> UtilsResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut src = Self::from_json_str(&text);
        src.label = path.display().to_string();
        Ok(src)
    }

    /// Parse JSON or NDJSON held in memory.
    ///
    /// Malformed NDJSON lines do not fail construction; each one surfaces as a row read error.
    pub fn from_json_str(input: &str) -> Self {
        let trimmed = input.trim();
        let parsed = serde_json::from_str::<serde_json::Value>(trimmed);
        let items: VecDeque<Result<serde_json::Value, String>> = match parsed {
            Ok(serde_json::Value::Array(items)) => items.into_iter().map(Ok).collect(),
            Ok(v) => VecDeque::from([Ok(v)]),
            // Fall back to NDJSON.
            Err(_) => trimmed
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| serde_json::from_str(line).map_err(|e| e.to_string()))
                .collect(),
        };
        Self {
            items,
            columns: None,
            label: "json".to_string(),
            position: 0,
        }
    }

    fn column_names(&self) -> UtilsResult<Vec<String>> {
        match self.items.front() {
            None => Err(UtilsError::ColumnList {
                message: "json input has no rows".to_string(),
            }),
            Some(Err(message)) => Err(UtilsError::ColumnList {
                message: format!("first row is not valid json: {message}"),
            }),
            Some(Ok(serde_json::Value::Object(obj))) => Ok(obj.keys().cloned().collect()),
            Some(Ok(_)) => Err(UtilsError::ColumnList {
                message: "first row is not a json object".to_string(),
            }),
        }
    }
}

impl RowSource for JsonRowSource {
    fn columns(&mut self) -> UtilsResult<Vec<String>> {
        if let Some(cols) = &self.columns {
            return Ok(cols.clone());
        }
        let cols = self.column_names()?;
        self.columns = Some(cols.clone());
        Ok(cols)
    }

    fn next_row(&mut self, slots: &mut [RawValue]) -> Option<UtilsResult<()>> {
        let item = self.items.pop_front()?;
        self.position += 1;
        let row_num = self.position;

        let result = match item {
            Err(message) => Err(UtilsError::RowRead {
                row: row_num,
                message,
            }),
            Ok(serde_json::Value::Object(mut obj)) => match &self.columns {
                None => Err(UtilsError::RowRead {
                    row: row_num,
                    message: "columns were not read before rows".to_string(),
                }),
                Some(cols) => {
                    for (slot, col) in slots.iter_mut().zip(cols) {
                        *slot = obj.remove(col).map_or(RawValue::Null, convert_json_value);
                    }
                    if !obj.is_empty() {
                        tracing::debug!(
                            source = %self.label,
                            row = row_num,
                            ignored = ?obj.keys().collect::<Vec<_>>(),
                            "keys outside the column list"
                        );
                    }
                    Ok(())
                }
            },
            Ok(_) => Err(UtilsError::RowRead {
                row: row_num,
                message: "row is not a json object".to_string(),
            }),
        };
        Some(result)
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

fn convert_json_value(v: serde_json::Value) -> RawValue {
    match v {
        serde_json::Value::Null => RawValue::Null,
        serde_json::Value::Bool(b) => RawValue::Bool(b),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => RawValue::Int64(i),
            (None, Some(f)) if n.is_f64() => RawValue::Float64(f),
            // u64 beyond i64::MAX
            _ => RawValue::Other(serde_json::Value::Number(n)),
        },
        serde_json::Value::String(s) => RawValue::Text(s),
        other => RawValue::Other(other),
    }
}
