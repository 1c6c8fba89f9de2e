//! Key-set operations over [`StringMap`]s.
//!
//! All functions are pure and total: they never mutate their inputs and substitute a sentinel
//! (`-1`, an empty `Vec`, `false`) instead of failing. Orders of returned keys/values follow the
//! map's iteration order and are unspecified.
//!
//! ```rust
//! use service_utils::keys::{keys_equal_by_non_empty_value, without_keys};
//! use service_utils::types::StringMap;
//!
//! let submitted: StringMap = [("host", "db"), ("port", "5432"), ("debug", "")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//! let template: StringMap = [("host", "x"), ("port", "x"), ("debug", "x")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//!
//! assert!(keys_equal_by_non_empty_value(&submitted, &template));
//! assert_eq!(without_keys(&submitted, &["debug"]).len(), 2);
//! ```

use std::collections::HashSet;

use crate::types::StringMap;

/// All keys of `map`, one per entry.
pub fn keys(map: &StringMap) -> Vec<String> {
    map.keys().cloned().collect()
}

/// Keys whose value is non-empty.
pub fn keys_with_value(map: &StringMap) -> Vec<String> {
    map.iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, _)| k.clone())
        .collect()
}

/// Non-empty values. Duplicates are kept when several keys share a value.
pub fn values_non_empty(map: &StringMap) -> Vec<String> {
    map.values().filter(|v| !v.is_empty()).cloned().collect()
}

/// Index of the first element equal to `value`, or `-1` if there is none.
pub fn index_of<S: AsRef<str>>(items: &[S], value: &str) -> isize {
    items
        .iter()
        .position(|item| item.as_ref() == value)
        .map_or(-1, |i| i as isize)
}

/// Length-gated comparison of the keys that carry a non-empty value.
///
/// Returns `true` iff both maps have the same number of entries and every key of `left` with a
/// non-empty value is also a key with a non-empty value in `right`. The subset check runs in one
/// direction only; it is not symmetric key-set equality.
pub fn keys_equal_by_non_empty_value(left: &StringMap, right: &StringMap) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let right_keys: HashSet<&str> = non_empty_keys(right).collect();
    non_empty_keys(left).all(|k| right_keys.contains(k))
}

/// Returns `true` iff every key of `left`, regardless of its value, is present in `right`.
pub fn keys_subset_of(left: &StringMap, right: &StringMap) -> bool {
    left.keys().all(|k| right.contains_key(k))
}

/// A new map holding every entry of `map` whose key is not listed in `exclude`.
///
/// Keys in `exclude` that `map` does not contain are ignored.
pub fn without_keys<S: AsRef<str>>(map: &StringMap, exclude: &[S]) -> StringMap {
    let excluded: HashSet<&str> = exclude.iter().map(AsRef::as_ref).collect();
    let mut out = StringMap::with_capacity(map.len().saturating_sub(exclude.len()));
    for (k, v) in map {
        if !excluded.contains(k.as_str()) {
            out.insert(k.clone(), v.clone());
        }
    }
    out
}

fn non_empty_keys(map: &StringMap) -> impl Iterator<Item = &str> {
    map.iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, _)| k.as_str())
}
