//! In-memory row source.

use std::collections::VecDeque;

use crate::error::{UtilsError, UtilsResult};
use crate::types::RawValue;

use super::source::RowSource;

/// Row source over caller-built rows.
///
/// Column-list and per-row failures can be injected, which makes it a convenient stand-in for
/// a database cursor.
#[derive(Debug, Clone)]
pub struct MemoryRowSource {
    columns: Result<Vec<String>, String>,
    rows: VecDeque<Result<Vec<RawValue>, String>>,
    position: usize,
}

impl MemoryRowSource {
    pub fn new<C, I>(columns: C, rows: Vec<Vec<RawValue>>) -> Self
    where
        C: IntoIterator<Item = I>,
        I: Into<String>,
    {
        Self {
            columns: Ok(columns.into_iter().map(Into::into).collect()),
            rows: rows.into_iter().map(Ok).collect(),
            position: 0,
        }
    }

    /// Make [`RowSource::columns`] fail with `message`.
    pub fn with_column_error(mut self, message: impl Into<String>) -> Self {
        self.columns = Err(message.into());
        self
    }

    /// Append a row that fails to read with `message`.
    pub fn push_failed_row(&mut self, message: impl Into<String>) {
        self.rows.push_back(Err(message.into()));
    }

    /// Append a readable row.
    pub fn push_row(&mut self, row: Vec<RawValue>) {
        self.rows.push_back(Ok(row));
    }

    /// Rows not yet pulled.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl RowSource for MemoryRowSource {
    fn columns(&mut self) -> UtilsResult<Vec<String>> {
        self.columns
            .clone()
            .map_err(|message| UtilsError::ColumnList { message })
    }

    fn next_row(&mut self, slots: &mut [RawValue]) -> Option<UtilsResult<()>> {
        let row = self.rows.pop_front()?;
        self.position += 1;
        let row_num = self.position;

        let result = match row {
            Err(message) => Err(UtilsError::RowRead {
                row: row_num,
                message,
            }),
            Ok(cells) if cells.len() != slots.len() => Err(UtilsError::RowRead {
                row: row_num,
                message: format!(
                    "expected {} values, got {}",
                    slots.len(),
                    cells.len()
                ),
            }),
            Ok(cells) => {
                for (slot, cell) in slots.iter_mut().zip(cells) {
                    *slot = cell;
                }
                Ok(())
            }
        };
        Some(result)
    }

    fn label(&self) -> String {
        "memory".to_string()
    }
}
