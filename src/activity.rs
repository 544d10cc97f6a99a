//! # Signature activity tables
//!
//! An [`ActivityTable`] has one row per sample: a text column holding the sample
//! ids followed by typed value columns. Column types are inferred from the cells
//! when a table is built from text, so that signature counts written by the
//! signature assignment tool come out as [`Column::Integer`] columns.
use anyhow::Result;
use indexmap::IndexMap;

use crate::{error::ExposureError, table::Table};

/// Name of the sample id column in activity files.
pub const SAMPLES: &str = "Samples";

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Integer(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    /// Infer the narrowest type that fits every cell: integer, then float, then text.
    pub fn infer(cells: Vec<String>) -> Self {
        let integers: Result<Vec<i64>, _> = cells.iter().map(|c| c.trim().parse()).collect();
        if let Ok(values) = integers {
            return Column::Integer(values);
        }
        let floats: Result<Vec<f64>, _> = cells.iter().map(|c| c.trim().parse()).collect();
        if let Ok(values) = floats {
            return Column::Float(values);
        }
        Column::Text(cells)
    }
    pub fn len(&self) -> usize {
        match self {
            Column::Integer(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Value at `row` as a float, `None` for text columns.
    pub fn get_f64(&self, row: usize) -> Option<f64> {
        match self {
            Column::Integer(v) => v.get(row).map(|x| *x as f64),
            Column::Float(v) => v.get(row).copied(),
            Column::Text(_) => None,
        }
    }
    /// Number of strictly positive values, `None` for text columns.
    pub fn count_positive(&self) -> Option<usize> {
        match self {
            Column::Integer(v) => Some(v.iter().filter(|x| **x > 0).count()),
            Column::Float(v) => Some(v.iter().filter(|x| **x > 0.0).count()),
            Column::Text(_) => None,
        }
    }
    fn cell(&self, row: usize) -> String {
        match self {
            Column::Integer(v) => v[row].to_string(),
            // keep the decimal point so the column reads back as floats
            Column::Float(v) => format!("{:?}", v[row]),
            Column::Text(v) => v[row].clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityTable {
    sample_column: String,
    samples: Vec<String>,
    columns: IndexMap<String, Column>,
}

impl ActivityTable {
    pub fn new(
        sample_column: &str,
        samples: Vec<String>,
        columns: IndexMap<String, Column>,
    ) -> Result<Self> {
        if let Some((name, column)) = columns.iter().find(|(_, c)| c.len() != samples.len()) {
            return Err(ExposureError::InvalidParameter(format!(
                "column '{name}' has {} values for {} samples",
                column.len(),
                samples.len()
            ))
            .into());
        }
        if columns.contains_key(sample_column) {
            return Err(ExposureError::InvalidParameter(format!(
                "'{sample_column}' is both the sample column and a value column"
            ))
            .into());
        }
        Ok(Self {
            sample_column: sample_column.to_string(),
            samples,
            columns,
        })
    }

    /// Build from a text table, taking sample ids from `sample_column` and
    /// inferring the type of every other column.
    pub fn from_table(table: &Table, sample_column: &str) -> Result<Self> {
        let sample_idx = table.column_index(sample_column)?;
        let samples = table.rows().iter().map(|r| r[sample_idx].clone()).collect();

        let mut columns = IndexMap::new();
        for (idx, name) in table.header().iter().enumerate() {
            if idx == sample_idx {
                continue;
            }
            let cells = table.rows().iter().map(|r| r[idx].clone()).collect();
            columns.insert(name.clone(), Column::infer(cells));
        }
        Self::new(sample_column, samples, columns)
    }

    /// Text table with the sample column first.
    pub fn to_table(&self) -> Result<Table> {
        let mut header = vec![self.sample_column.clone()];
        header.extend(self.columns.keys().cloned());

        let rows = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let mut row = vec![sample.clone()];
                row.extend(self.columns.values().map(|c| c.cell(i)));
                row
            })
            .collect();

        Table::new(header, rows)
    }

    pub fn sample_column(&self) -> &str {
        &self.sample_column
    }
    pub fn samples(&self) -> &[String] {
        &self.samples
    }
    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }
    pub fn columns(&self) -> &IndexMap<String, Column> {
        &self.columns
    }
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
    /// Value of `column` for `sample` as a float.
    pub fn get(&self, sample: &str, column: &str) -> Option<f64> {
        let row = self.samples.iter().position(|s| s == sample)?;
        self.columns.get(column)?.get_f64(row)
    }
}
