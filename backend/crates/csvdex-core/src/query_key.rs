//! Query-side key construction.

use crate::key_expander::{segment, KEY_SEPARATOR};
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Rebuild the composite key for a query.
///
/// Walks `searchable` in configured order and appends `column_value` for
/// every column with a non-empty value in `params`. Request order and
/// parameters outside `searchable` are ignored. Returns `None` when no
/// searchable column was supplied.
///
/// Only combinations reachable by the left-anchored expansion resolve to a
/// stored row; see [`crate::key_expander`].
pub fn build_query_key<S: BuildHasher>(
    searchable: &[String],
    params: &HashMap<String, String, S>,
) -> Option<String> {
    let mut key = String::new();

    for column in searchable {
        let Some(value) = params.get(column) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if !key.is_empty() {
            key.push(KEY_SEPARATOR);
        }
        key.push_str(&segment(column, value));
    }

    (!key.is_empty()).then_some(key)
}
