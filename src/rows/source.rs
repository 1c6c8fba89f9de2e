use crate::error::UtilsResult;
use crate::types::RawValue;

/// A pull-style cursor over tabular rows of runtime-typed cells.
///
/// Callers first ask for [`RowSource::columns`], then repeatedly call [`RowSource::next_row`]
/// with a slot buffer of the same length.
pub trait RowSource {
    /// Ordered column names for the current result shape.
    ///
    /// Fails with [`crate::UtilsError::ColumnList`] (or a wrapped reader error) when the shape
    /// cannot be determined.
    fn columns(&mut self) -> UtilsResult<Vec<String>>;

    /// Advance to the next row and scan its cells into `slots`.
    ///
    /// - `None`: the source is exhausted.
    /// - `Some(Err(_))`: this row could not be read; the source stays usable and the next call
    ///   moves on to the following row.
    /// - `Some(Ok(()))`: `slots[i]` holds the cell for column `i`.
    fn next_row(&mut self, slots: &mut [RawValue]) -> Option<UtilsResult<()>>;

    /// Name used in log lines.
    fn label(&self) -> String {
        "rows".to_string()
    }
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn columns(&mut self) -> UtilsResult<Vec<String>> {
        (**self).columns()
    }

    fn next_row(&mut self, slots: &mut [RawValue]) -> Option<UtilsResult<()>> {
        (**self).next_row(slots)
    }

    fn label(&self) -> String {
        (**self).label()
    }
}
