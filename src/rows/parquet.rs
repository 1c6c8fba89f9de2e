//! Parquet row source.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parquet::file::metadata::RowGroupMetaData;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::file::serialized_reader::ReadOptionsBuilder;
use parquet::record::reader::RowIter;
use parquet::record::{Field, Row};

use crate::error::{UtilsError, UtilsResult};
use crate::types::RawValue;

use super::source::RowSource;

/// Row source over a Parquet file, read through the record API one row group at a time.
///
/// Columns are the top-level schema fields. Nested groups, lists, maps, decimals and dates are
/// passed through as their display text inside [`RawValue::Other`].
///
/// A read error abandons the rest of the current row group: it is reported once and the scan
/// resumes at the next row group.
pub struct ParquetRowSource {
    path: PathBuf,
    columns: Vec<String>,
    num_row_groups: usize,
    next_group: usize,
    rows: Option<RowIter<'static>>,
    label: String,
    position: usize,
}

impl ParquetRowSource {
    pub fn from_path(path: impl AsRef<Path>) -> UtilsResult<Self> {
        let path = path.as_ref();
        let reader = SerializedFileReader::try_from(path)?;
        let metadata = reader.metadata();
        let columns = metadata
            .file_metadata()
            .schema()
            .get_fields()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        Ok(Self {
            path: path.to_path_buf(),
            columns,
            num_row_groups: metadata.num_row_groups(),
            next_group: 0,
            rows: None,
            label: path.display().to_string(),
            position: 0,
        })
    }

    fn open_row_group(&self, idx: usize) -> UtilsResult<RowIter<'static>> {
        let file = File::open(&self.path)?;
        let options = ReadOptionsBuilder::new()
            .with_predicate(Box::new(move |_: &RowGroupMetaData, i: usize| i == idx))
            .build();
        let reader = SerializedFileReader::new_with_options(file, options)?;
        Ok(reader.into_iter())
    }

    fn row_error(&mut self, message: String) -> UtilsResult<()> {
        self.position += 1;
        Err(UtilsError::RowRead {
            row: self.position,
            message,
        })
    }

    fn fill(&self, row: &Row, slots: &mut [RawValue]) {
        let by_name: HashMap<&str, &Field> = row
            .get_column_iter()
            .map(|(name, field)| (name.as_str(), field))
            .collect();
        for (slot, col) in slots.iter_mut().zip(&self.columns) {
            *slot = by_name
                .get(col.as_str())
                .map_or(RawValue::Null, |f| convert_parquet_field(f));
        }
    }
}

impl RowSource for ParquetRowSource {
    fn columns(&mut self) -> UtilsResult<Vec<String>> {
        Ok(self.columns.clone())
    }

    fn next_row(&mut self, slots: &mut [RawValue]) -> Option<UtilsResult<()>> {
        loop {
            if self.rows.is_none() {
                if self.next_group >= self.num_row_groups {
                    return None;
                }
                let idx = self.next_group;
                self.next_group += 1;
                match self.open_row_group(idx) {
                    Ok(rows) => self.rows = Some(rows),
                    Err(e) => return Some(self.row_error(format!("row group {idx}: {e}"))),
                }
            }

            match self.rows.as_mut().and_then(|rows| rows.next()) {
                None => self.rows = None,
                Some(Err(e)) => {
                    // The iterator does not advance past a failed page; drop the group.
                    self.rows = None;
                    let group = self.next_group - 1;
                    return Some(self.row_error(format!("row group {group}: {e}")));
                }
                Some(Ok(row)) => {
                    self.position += 1;
                    self.fill(&row, slots);
                    return Some(Ok(()));
                }
            }
        }
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

fn convert_parquet_field(f: &Field) -> RawValue {
    match f {
        Field::Null => RawValue::Null,
        Field::Bool(b) => RawValue::Bool(*b),
        Field::Byte(v) => RawValue::Int32(i32::from(*v)),
        Field::Short(v) => RawValue::Int32(i32::from(*v)),
        Field::Int(v) => RawValue::Int32(*v),
        Field::Long(v) => RawValue::Int64(*v),
        Field::UByte(v) => RawValue::Int32(i32::from(*v)),
        Field::UShort(v) => RawValue::Int32(i32::from(*v)),
        Field::UInt(v) => RawValue::Int64(i64::from(*v)),
        Field::ULong(v) => i64::try_from(*v)
            .map(RawValue::Int64)
            .unwrap_or_else(|_| RawValue::Other(serde_json::Value::from(*v))),
        Field::Float(v) => RawValue::Float64(f64::from(*v)),
        Field::Double(v) => RawValue::Float64(*v),
        Field::Str(s) => RawValue::Text(s.clone()),
        Field::Bytes(b) => RawValue::Bytes(b.data().to_vec()),
        Field::TimestampMillis(ms) => timestamp(DateTime::from_timestamp_millis(*ms), f),
        Field::TimestampMicros(us) => timestamp(DateTime::from_timestamp_micros(*us), f),
        other => RawValue::Other(serde_json::Value::String(other.to_string())),
    }
}

fn timestamp(ts: Option<DateTime<Utc>>, f: &Field) -> RawValue {
    ts.map_or_else(
        || RawValue::Other(serde_json::Value::String(f.to_string())),
        RawValue::Timestamp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_widths_and_timestamps() {
        assert_eq!(convert_parquet_field(&Field::Short(-3)), RawValue::Int32(-3));
        assert_eq!(convert_parquet_field(&Field::Long(9)), RawValue::Int64(9));
        assert_eq!(
            convert_parquet_field(&Field::ULong(u64::MAX)),
            RawValue::Other(serde_json::Value::from(u64::MAX))
        );
        assert_eq!(
            convert_parquet_field(&Field::TimestampMillis(1_700_000_000_000)),
            RawValue::Timestamp(DateTime::from_timestamp_millis(1_700_000_000_000).unwrap())
        );
        assert_eq!(convert_parquet_field(&Field::Null), RawValue::Null);
    }
}
