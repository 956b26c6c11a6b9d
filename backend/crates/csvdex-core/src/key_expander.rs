//! Composite key expansion.
//!
//! Every row is stored under several composite keys so it can be fetched by
//! different column combinations. A composite key is a chain of
//! `column_value` segments joined by `_`.
//!
//! For the effective columns `[c0, c1, .., cn-1]` the walk is left-anchored:
//! each column in turn becomes the anchor, is emitted alone, and is then
//! paired with every later column `cj`; each pair is extended one column at a
//! time with the columns that follow `cj`, emitting a key per step.
//!
//! ```text
//! [a, b, c, d] -> a, a_b, a_b_c, a_b_c_d, a_c, a_c_d, a_d,
//!                 b, b_c, b_c_d, b_d,
//!                 c, c_d,
//!                 d
//! ```
//!
//! This does not cover every subset (`a_b_d` is never produced), and the
//! query side has to build keys in the same column order.

use crate::row::Row;

/// Joins a column name to its value and segments to each other.
pub const KEY_SEPARATOR: char = '_';

/// Columns that take part in key expansion.
///
/// An empty `searchable` list selects every column in declared order.
/// Otherwise the caller's order is kept and unknown columns are skipped.
pub fn effective_columns(searchable: &[String], all_columns: &[String]) -> Vec<String> {
    if searchable.is_empty() {
        return all_columns.to_vec();
    }

    searchable
        .iter()
        .filter(|column| all_columns.contains(column))
        .cloned()
        .collect()
}

/// All composite keys for `row`, resolving the effective columns first.
pub fn expand_keys(searchable: &[String], all_columns: &[String], row: &Row) -> Vec<String> {
    expand_effective(&effective_columns(searchable, all_columns), row)
}

/// All composite keys for `row` over already-resolved columns.
///
/// Deterministic: identical inputs give identical keys in identical order.
pub fn expand_effective(columns: &[String], row: &Row) -> Vec<String> {
    let segments: Vec<String> = columns
        .iter()
        .map(|column| segment(column, row.get(column).unwrap_or_default()))
        .collect();

    let mut keys = Vec::with_capacity(key_count(segments.len()));

    for (i, anchor) in segments.iter().enumerate() {
        keys.push(anchor.clone());

        let remaining = &segments[i + 1..];
        for (j, partner) in remaining.iter().enumerate() {
            let mut key = String::with_capacity(anchor.len() + 1 + partner.len());
            key.push_str(anchor);
            key.push(KEY_SEPARATOR);
            key.push_str(partner);
            keys.push(key.clone());

            for next in &remaining[j + 1..] {
                key.push(KEY_SEPARATOR);
                key.push_str(next);
                keys.push(key.clone());
            }
        }
    }

    keys
}

/// Number of keys `expand_effective` yields for `n` columns.
///
/// The anchor at position `i` has `m = n - 1 - i` columns after it and emits
/// `1 + m(m+1)/2` keys.
pub fn key_count(n: usize) -> usize {
    (0..n)
        .map(|i| {
            let m = n - 1 - i;
            1 + m * (m + 1) / 2
        })
        .sum()
}

pub(crate) fn segment(column: &str, value: &str) -> String {
    let mut s = String::with_capacity(column.len() + 1 + value.len());
    s.push_str(column);
    s.push(KEY_SEPARATOR);
    s.push_str(value);
    s
}
