//! Row model.
//!
//! A row shares its column list with every other row of the same load and
//! serializes to a JSON object that keeps the declared column order.

use crate::error::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

/// One data line, keyed by column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<String>,
}

impl Row {
    /// Build a row against a shared column list.
    ///
    /// Missing trailing values become empty strings; values beyond the last
    /// column are dropped.
    pub fn new(columns: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.resize(columns.len(), String::new());
        Self { columns, values }
    }

    /// Convenience constructor from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (columns, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self::new(columns.into(), values)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Value of `column`, or `None` when the row has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx].as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .zip(self.values.iter())
            .map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Serialized form stored under every key of this row.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_keeps_column_order() {
        let row = Row::from_pairs([("id", "1"), ("name", "Ann"), ("city", "NY")]);
        assert_eq!(
            String::from_utf8(row.to_json_bytes().unwrap()).unwrap(),
            r#"{"id":"1","name":"Ann","city":"NY"}"#
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let columns: Arc<[String]> = vec!["a".to_string(), "b".to_string()].into();
        let row = Row::new(columns, vec!["x".to_string()]);

        assert_eq!(row.get("a"), Some("x"));
        assert_eq!(row.get("b"), Some(""));
        assert_eq!(row.get("c"), None);
    }

    #[test]
    fn test_extra_values_are_dropped() {
        let columns: Arc<[String]> = vec!["a".to_string()].into();
        let row = Row::new(columns, vec!["x".to_string(), "y".to_string()]);

        assert_eq!(row.iter().count(), 1);
    }
}
