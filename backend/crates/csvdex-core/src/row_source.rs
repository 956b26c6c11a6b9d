//! Row sources.
//!
//! A row source is a finite, non-restartable pull iterator over rows with a
//! column list that is known before the first row is pulled. An `Err` item
//! aborts the load.

use crate::error::{IndexError, Result};
use crate::row::Row;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

pub trait RowSource: Iterator<Item = Result<Row>> {
    /// Resolved column names, in declared order.
    fn columns(&self) -> &[String];
}

/// CSV-backed row source.
pub struct CsvRowSource<R: Read = File> {
    reader: csv::Reader<R>,
    columns: Arc<[String]>,
    record: StringRecord,
    records_read: u64,
}

impl CsvRowSource<File> {
    /// Open a CSV file.
    ///
    /// With `columns` given every line is data; otherwise the first line
    /// supplies the column names. An unreadable file is a configuration error.
    pub fn open(path: &Path, columns: Option<&[String]>) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            IndexError::Configuration(format!("could not read {}: {}", path.display(), e))
        })?;
        Self::from_reader(file, columns)
    }
}

impl<R: Read> CsvRowSource<R> {
    pub fn from_reader(reader: R, columns: Option<&[String]>) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(columns.is_none())
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = match columns {
            Some(names) => names.to_vec(),
            None => reader
                .headers()
                .map_err(|e| IndexError::RowSource(format!("cannot read header: {}", e)))?
                .iter()
                .map(str::to_string)
                .collect(),
        };

        Ok(Self {
            reader,
            columns: columns.into(),
            record: StringRecord::new(),
            records_read: 0,
        })
    }

    pub fn records_read(&self) -> u64 {
        self.records_read
    }
}

impl<R: Read> Iterator for CsvRowSource<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                self.records_read += 1;
                let values = self.record.iter().map(str::to_string).collect();
                Some(Ok(Row::new(Arc::clone(&self.columns), values)))
            }
            Ok(false) => None,
            Err(e) => Some(Err(IndexError::RowSource(format!(
                "record {}: {}",
                self.records_read + 1,
                e
            )))),
        }
    }
}

impl<R: Read> RowSource for CsvRowSource<R> {
    fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// In-memory row source, handy for tests and embedding.
pub struct VecRowSource {
    columns: Arc<[String]>,
    rows: std::vec::IntoIter<Vec<String>>,
}

impl VecRowSource {
    pub fn new<C, S>(columns: C, rows: Vec<Vec<S>>) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        Self {
            columns: columns.into(),
            rows: rows.into_iter(),
        }
    }
}

impl Iterator for VecRowSource {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows
            .next()
            .map(|values| Ok(Row::new(Arc::clone(&self.columns), values)))
    }
}

impl RowSource for VecRowSource {
    fn columns(&self) -> &[String] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_supplies_columns() {
        let data = "id,name,city\n1,Ann,NY\n2,Bob,LA\n";
        let mut source = CsvRowSource::from_reader(data.as_bytes(), None).unwrap();

        assert_eq!(source.columns(), ["id", "name", "city"]);
        let first = source.next().unwrap().unwrap();
        assert_eq!(first.get("name"), Some("Ann"));
        assert!(source.next().unwrap().is_ok());
        assert!(source.next().is_none());
        assert_eq!(source.records_read(), 2);
    }

    #[test]
    fn test_explicit_columns_treat_first_line_as_data() {
        let data = "1,Ann,NY\n";
        let columns = vec!["id".to_string(), "name".to_string(), "city".to_string()];
        let source = CsvRowSource::from_reader(data.as_bytes(), Some(&columns)).unwrap();

        let rows: Vec<Row> = source.map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("id"), Some("1"));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let data = "id,name,city\n1,Ann\n";
        let mut source = CsvRowSource::from_reader(data.as_bytes(), None).unwrap();

        let row = source.next().unwrap().unwrap();
        assert_eq!(row.get("city"), Some(""));
    }

    #[test]
    fn test_invalid_utf8_is_a_row_source_error() {
        let data: &[u8] = b"id\n\xff\xfe\n";
        let mut source = CsvRowSource::from_reader(data, None).unwrap();

        assert!(matches!(source.next(), Some(Err(IndexError::RowSource(_)))));
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = CsvRowSource::open(Path::new("/definitely/not/here.csv"), None)
            .err()
            .unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_vec_source_shares_columns() {
        let source = VecRowSource::new(["a", "b"], vec![vec!["1", "2"], vec!["3", "4"]]);
        assert_eq!(source.columns(), ["a", "b"]);

        let rows: Vec<Row> = source.map(|r| r.unwrap()).collect();
        assert_eq!(rows[1].get("b"), Some("4"));
    }
}
