//! Dataset representation for validation.
//!
//! A [`DataSet`] is an ordered sequence of rows plus the ordered list of
//! columns the source declared. A column listed by the dataset but missing
//! from an individual row reads as [`DataValue::Null`].

use pipecheck_core::DataValue;
use std::collections::HashMap;

static NULL: DataValue = DataValue::Null;

/// A single row of data.
pub type DataRow = HashMap<String, DataValue>;

/// A dataset containing multiple rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    /// Column names, in source order
    columns: Vec<String>,
    /// The data rows
    rows: Vec<DataRow>,
}

impl DataSet {
    /// Creates a new empty dataset.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a dataset from a column list and rows.
    pub fn new(columns: Vec<String>, rows: Vec<DataRow>) -> Self {
        let mut dataset = Self {
            columns,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            dataset.add_row(row);
        }
        dataset
    }

    /// Creates a dataset from rows, deriving the column list from their keys.
    pub fn from_rows(rows: Vec<DataRow>) -> Self {
        Self::new(Vec::new(), rows)
    }

    /// Creates a dataset from a header and positional records.
    ///
    /// Records shorter than the header are padded with nulls; extra cells
    /// are dropped.
    pub fn from_table(header: &[&str], records: Vec<Vec<DataValue>>) -> Self {
        let columns: Vec<String> = header.iter().map(|c| c.to_string()).collect();
        let rows = records
            .into_iter()
            .map(|record| {
                let mut cells = record.into_iter();
                columns
                    .iter()
                    .map(|c| (c.clone(), cells.next().unwrap_or(DataValue::Null)))
                    .collect::<DataRow>()
            })
            .collect();
        Self { columns, rows }
    }

    /// Returns the column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns true if the dataset has the column.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Returns the number of rows in the dataset.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &DataRow> {
        self.rows.iter()
    }

    /// Gets a specific row by index.
    pub fn get_row(&self, index: usize) -> Option<&DataRow> {
        self.rows.get(index)
    }

    /// Returns the value at `(row, column)`, null when either is absent.
    pub fn value(&self, row: usize, column: &str) -> &DataValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL)
    }

    /// Returns the values of a column, one per row.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a DataValue> + 'a {
        self.rows.iter().map(move |r| r.get(column).unwrap_or(&NULL))
    }

    /// Adds a row to the dataset, registering any column it introduces.
    pub fn add_row(&mut self, row: DataRow) {
        let mut new_columns: Vec<&String> = row
            .keys()
            .filter(|k| !self.columns.contains(k))
            .collect();
        new_columns.sort();
        let new_columns: Vec<String> = new_columns.into_iter().cloned().collect();
        self.columns.extend(new_columns);
        self.rows.push(row);
    }

    /// Takes the first `size` rows.
    ///
    /// If `size` is greater than the number of rows, returns all rows.
    pub fn sample(&self, size: usize) -> DataSet {
        DataSet {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(size).cloned().collect(),
        }
    }
}

impl FromIterator<DataRow> for DataSet {
    fn from_iter<T: IntoIterator<Item = DataRow>>(iter: T) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}
