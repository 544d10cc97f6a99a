//! # In-memory delimited tables
//!
//! [`Table`] holds a header and rows of text cells, which is all the MAF
//! splitter and the overlap matcher need: every MAF column is carried through
//! verbatim and only the interval columns are ever parsed as numbers.
use anyhow::Result;
use indexmap::IndexMap;

use crate::error::ExposureError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, checking that every row is as wide as the header.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != header.len())
        {
            return Err(ExposureError::InvalidParameter(format!(
                "row {i} has {} fields, header has {}",
                row.len(),
                header.len()
            ))
            .into());
        }
        Ok(Self { header, rows })
    }

    /// Convenience constructor from string slices.
    ///
    /// # Examples
    ///
    /// ```
    /// use sbs_exposure::table::Table;
    ///
    /// let panel = Table::from_rows(&["chrom", "start", "end"], &[&["1", "100", "200"]]).unwrap();
    /// assert_eq!(1, panel.n_rows());
    /// assert_eq!(Some(2), panel.position("end"));
    /// ```
    pub fn from_rows(header: &[&str], rows: &[&[&str]]) -> Result<Self> {
        Self::new(
            header.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn position(&self, column: &str) -> Option<usize> {
        self.header.iter().position(|h| h == column)
    }

    /// Index of `column`, or [`ExposureError::MissingColumn`].
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.position(column)
            .ok_or_else(|| ExposureError::MissingColumn(column.to_string()).into())
    }

    /// Iterate over the cells of `column`.
    pub fn column(&self, column: &str) -> Result<impl Iterator<Item = &str>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| row[idx].as_str()))
    }

    /// New table with the rows at `indices`, in that order. Indices may repeat.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            header: self.header.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Row indices grouped by the value in `column`, groups in order of first appearance.
    pub fn group_by(&self, column: &str) -> Result<IndexMap<&str, Vec<usize>>> {
        let idx = self.column_index(column)?;
        let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
        for (i, row) in self.rows.iter().enumerate() {
            groups.entry(row[idx].as_str()).or_default().push(i);
        }
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants() -> Table {
        Table::from_rows(
            &["Chromosome", "Tumor_Sample_Barcode"],
            &[&["1", "S1"], &["2", "S2"], &["3", "S1"]],
        )
        .unwrap()
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = Table::from_rows(&["a", "b"], &[&["1", "2"], &["3"]]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_column_is_reported() {
        let err = variants().column_index("Start_Position").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExposureError>(),
            Some(ExposureError::MissingColumn(c)) if c == "Start_Position"
        ));
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let table = variants();
        let groups = table.group_by("Tumor_Sample_Barcode").unwrap();
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(vec!["S1", "S2"], keys);
        assert_eq!(vec![0, 2], groups["S1"]);
    }

    #[test]
    fn select_rows_allows_repeats() {
        let selected = variants().select_rows(&[1, 1]);
        assert_eq!(2, selected.n_rows());
        assert_eq!("S2", selected.rows()[1][1]);
    }
}
