//! Row normalization: runtime-typed rows into uniform [`Record`]s.
//!
//! Failure handling is deliberately split:
//!
//! - if the column list cannot be read, exactly one failure is logged and no records are
//!   produced at all;
//! - if a single row cannot be read, that failure is logged and the scan continues with the
//!   next row.
//!
//! Null cells are omitted from the record; empty text is kept.

use crate::coerce::coerce;
use crate::logging::{LogContext, LogSink, NormalizeStats, Operation, severity_for_error};
use crate::types::{RawValue, Record};

use super::source::RowSource;

/// Normalize every row of `source` and collect the records.
///
/// ```rust
/// use service_utils::logging::TracingSink;
/// use service_utils::rows::{normalize, MemoryRowSource};
/// use service_utils::types::{RawValue, Value};
///
/// let mut src = MemoryRowSource::new(
///     ["id", "name", "note"],
///     vec![vec![RawValue::from(1_i64), RawValue::from("Ada"), RawValue::Null]],
/// );
/// let records = normalize(&mut src, &TracingSink);
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0]["id"], Value::Int64(1));
/// assert!(!records[0].contains_key("note"));
/// ```
pub fn normalize<S>(source: &mut S, sink: &dyn LogSink) -> Vec<Record>
where
    S: RowSource + ?Sized,
{
    records(source, sink).collect()
}

/// Lazily normalize `source`, pulling one row per call to `next`.
///
/// The column list is read (and a failure logged) here, before the first record is requested.
/// When the iterator is exhausted the sink receives one `on_success` with the final counts.
pub fn records<'a, S>(source: &'a mut S, sink: &'a dyn LogSink) -> Records<'a, S>
where
    S: RowSource + ?Sized,
{
    let ctx = LogContext::new(Operation::Normalize, source.label());
    let columns = match source.columns() {
        Ok(cols) => Some(cols),
        Err(e) => {
            sink.on_failure(&ctx, severity_for_error(&e), &e);
            None
        }
    };
    let slots = vec![RawValue::Null; columns.as_ref().map_or(0, Vec::len)];
    Records {
        source,
        sink,
        ctx,
        columns,
        slots,
        stats: NormalizeStats::default(),
        done: false,
    }
}

/// Iterator returned by [`records`].
pub struct Records<'a, S: ?Sized> {
    source: &'a mut S,
    sink: &'a dyn LogSink,
    ctx: LogContext,
    /// `None` once the column list failed; the iterator then yields nothing.
    columns: Option<Vec<String>>,
    slots: Vec<RawValue>,
    stats: NormalizeStats,
    done: bool,
}

impl<S: RowSource + ?Sized> Records<'_, S> {
    /// Counts so far.
    pub fn stats(&self) -> NormalizeStats {
        self.stats
    }
}

impl<S: RowSource + ?Sized> Iterator for Records<'_, S> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.done {
            return None;
        }
        let Some(columns) = self.columns.as_ref() else {
            self.done = true;
            return None;
        };

        loop {
            match self.source.next_row(&mut self.slots) {
                None => {
                    self.done = true;
                    tracing::debug!(
                        source = %self.ctx.source,
                        rows = self.stats.rows,
                        skipped = self.stats.skipped,
                        "normalization finished"
                    );
                    self.sink.on_success(&self.ctx, self.stats);
                    return None;
                }
                Some(Err(e)) => {
                    self.stats.skipped += 1;
                    tracing::debug!(source = %self.ctx.source, error = %e, "skipping row");
                    self.sink.on_failure(&self.ctx, severity_for_error(&e), &e);
                }
                Some(Ok(())) => {
                    let mut record = Record::new();
                    for (col, slot) in columns.iter().zip(self.slots.iter_mut()) {
                        // Reset the slot so nothing leaks into the next row.
                        if let Some(value) = coerce(std::mem::take(slot)) {
                            record.insert(col.clone(), value);
                        }
                    }
                    self.stats.rows += 1;
                    return Some(record);
                }
            }
        }
    }
}
