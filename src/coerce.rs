//! Scalar coercion: one runtime-typed cell to one canonical [`Value`].

use crate::types::{RawValue, Value};

/// Coerce a single cell into its canonical representation.
///
/// Arms are checked in a fixed order: bool, fixed-width integer, wide integer, float, text,
/// timestamp, bytes, then the passthrough fallback. Fixed-width integers widen to
/// [`Value::Int64`]; bytes decode as UTF-8 (invalid sequences are replaced).
///
/// Returns `None` only for [`RawValue::Null`]; callers use this to omit null cells.
pub fn coerce(raw: RawValue) -> Option<Value> {
    let value = match raw {
        RawValue::Null => return None,
        RawValue::Bool(b) => Value::Bool(b),
        RawValue::Int32(v) => Value::Int64(i64::from(v)),
        RawValue::Int64(v) => Value::Int64(v),
        RawValue::Float64(v) => Value::Float64(v),
        RawValue::Text(s) => Value::Text(s),
        RawValue::Timestamp(ts) => Value::Timestamp(ts),
        RawValue::Bytes(bytes) => Value::Text(decode_bytes(bytes)),
        RawValue::Other(v) => Value::Unknown(v),
    };
    Some(value)
}

fn decode_bytes(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
