//! CSV row source.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{UtilsError, UtilsResult};
use crate::types::RawValue;

use super::source::RowSource;

/// Row source over a headered CSV file.
///
/// Every cell is delivered as [`RawValue::Text`]. Empty cells stay empty text unless
/// [`CsvRowSource::empty_as_null`] is enabled.
pub struct CsvRowSource<R> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
    empty_as_null: bool,
    label: String,
    position: usize,
}

impl CsvRowSource<File> {
    /// Open a CSV file with a header row.
    pub fn from_path(path: impl AsRef<Path>) -> UtilsResult<Self> {
        let path = path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        Ok(Self::with_reader(reader, path.display().to_string()))
    }
}

impl<R: Read> CsvRowSource<R> {
    /// Wrap any reader producing headered CSV.
    pub fn from_reader(rdr: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(rdr);
        Self::with_reader(reader, "csv".to_string())
    }

    fn with_reader(reader: csv::Reader<R>, label: String) -> Self {
        Self {
            reader,
            record: csv::StringRecord::new(),
            empty_as_null: false,
            label,
            position: 0,
        }
    }

    /// Treat empty (or whitespace-only) cells as nulls.
    pub fn empty_as_null(mut self, yes: bool) -> Self {
        self.empty_as_null = yes;
        self
    }

    fn cell(&self, raw: &str) -> RawValue {
        if self.empty_as_null && raw.trim().is_empty() {
            RawValue::Null
        } else {
            RawValue::Text(raw.to_owned())
        }
    }
}

impl<R: Read> RowSource for CsvRowSource<R> {
    fn columns(&mut self) -> UtilsResult<Vec<String>> {
        let headers = self.reader.headers().map_err(|e| UtilsError::ColumnList {
            message: e.to_string(),
        })?;
        Ok(headers.iter().map(str::to_owned).collect())
    }

    fn next_row(&mut self, slots: &mut [RawValue]) -> Option<UtilsResult<()>> {
        let mut record = std::mem::take(&mut self.record);
        let read = self.reader.read_record(&mut record);
        self.position += 1;
        // Report 1-based data row numbers.
        let row_num = self.position;

        let result = match read {
            Ok(false) => {
                self.record = record;
                return None;
            }
            Err(e) => Err(UtilsError::RowRead {
                row: row_num,
                message: e.to_string(),
            }),
            Ok(true) if record.len() != slots.len() => Err(UtilsError::RowRead {
                row: row_num,
                message: format!("expected {} fields, got {}", slots.len(), record.len()),
            }),
            Ok(true) => {
                for (slot, raw) in slots.iter_mut().zip(record.iter()) {
                    *slot = self.cell(raw);
                }
                Ok(())
            }
        };
        self.record = record;
        Some(result)
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_text_and_empty_stays_empty_by_default() {
        let mut src = CsvRowSource::from_reader("a,b\n1,\n".as_bytes());
        assert_eq!(src.columns().unwrap(), vec!["a", "b"]);

        let mut slots = vec![RawValue::Null; 2];
        src.next_row(&mut slots).unwrap().unwrap();
        assert_eq!(slots, vec![RawValue::from("1"), RawValue::from("")]);
        assert!(src.next_row(&mut slots).is_none());
    }

    #[test]
    fn empty_as_null_option() {
        let mut src = CsvRowSource::from_reader("a,b\n1, \n".as_bytes()).empty_as_null(true);
        let cols = src.columns().unwrap();
        let mut slots = vec![RawValue::Null; cols.len()];
        src.next_row(&mut slots).unwrap().unwrap();
        assert_eq!(slots, vec![RawValue::from("1"), RawValue::Null]);
    }
}
