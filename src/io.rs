//! # IO
//!
//! Reading and writing the tab-separated files `sbs_exposure` works with:
//! MAF files ([`maf`]), panel regions ([`panel`]), signature activity tables
//! ([`activities`]) and colour palettes ([`json`]).
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};

use crate::{error::ExposureError, table::Table};

pub mod activities;
pub mod json;
pub mod maf;
pub mod panel;

/// Where the MAF data for a run comes from. Resolved once, at the entry point.
#[derive(Debug, Clone)]
pub enum MafSource {
    FilePath(PathBuf),
    InMemory(Table),
}

impl MafSource {
    /// Turn an optional path into a source. No path means there is no input at all.
    pub fn from_option(path: Option<&str>) -> Result<Self, ExposureError> {
        match path {
            Some(path) => Ok(MafSource::FilePath(PathBuf::from(path))),
            None => Err(ExposureError::InputMissing),
        }
    }
    pub fn load(self) -> Result<Table> {
        match self {
            MafSource::FilePath(path) => maf::read_maf(path),
            MafSource::InMemory(table) => Ok(table),
        }
    }
}

impl From<Table> for MafSource {
    fn from(table: Table) -> Self {
        MafSource::InMemory(table)
    }
}

impl From<PathBuf> for MafSource {
    fn from(path: PathBuf) -> Self {
        MafSource::FilePath(path)
    }
}

/// Read a tab-separated file into a [`Table`]. Lines starting with `#` are skipped.
/// If `header` is `None` the first line is the header, otherwise the file has no
/// header line and `header` names its columns.
pub fn read_tsv<P: AsRef<Path>>(path: P, header: Option<&[&str]>) -> Result<Table> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(header.is_none())
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .from_path(path)
        .with_context(|| format!("Could not read {}", path.display()))?;

    let mut names: Vec<String> = match header {
        Some(names) => names.iter().map(|n| n.to_string()).collect(),
        None => reader
            .headers()
            .with_context(|| format!("Could not read header of {}", path.display()))?
            .iter()
            .map(String::from)
            .collect(),
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record =
            result.with_context(|| format!("Failed to read record in {}", path.display()))?;
        rows.push(record.iter().map(String::from).collect::<Vec<String>>());
    }

    // headerless files may carry more columns than we have names for
    if let Some(width) = rows.first().map(Vec::len) {
        while names.len() < width {
            names.push(format!("column_{}", names.len() + 1));
        }
        names.truncate(width);
    }

    Table::new(names, rows).with_context(|| format!("Malformed table in {}", path.display()))
}

/// Write `table` as tab-separated text with a header line.
pub fn write_tsv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    writer.write_record(table.header())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_tsv_to_path<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    write_tsv(table, BufWriter::new(file))
        .with_context(|| format!("Could not write {}", path.display()))
}

/// A file at `path`, or stdout when no path is given.
pub fn output_writer(path: Option<&str>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Could not create {path}"))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("with_comments.tsv");
        std::fs::write(&path, "#version 2.4\nchrom\tstart\tend\n#note\n1\t10\t20\n").unwrap();

        let table = read_tsv(&path, None).unwrap();
        assert_eq!(vec!["chrom", "start", "end"], table.header());
        assert_eq!(1, table.n_rows());
    }

    #[test]
    fn headerless_files_get_extra_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.bed");
        std::fs::write(&path, "1\t10\t20\tgeneA\n").unwrap();

        let table = read_tsv(&path, Some(&["chrom", "start", "end"])).unwrap();
        assert_eq!(vec!["chrom", "start", "end", "column_4"], table.header());
        assert_eq!("geneA", table.rows()[0][3]);
    }

    #[test]
    fn missing_input_is_an_error() {
        let err = MafSource::from_option(None).unwrap_err();
        assert!(matches!(err, ExposureError::InputMissing));
    }

    #[test]
    fn written_tables_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let table = Table::from_rows(&["a", "b"], &[&["x y", "1"]]).unwrap();
        write_tsv_to_path(&table, &path).unwrap();

        assert_eq!("a\tb\nx y\t1\n", std::fs::read_to_string(&path).unwrap());
        assert_eq!(table, read_tsv(&path, None).unwrap());
    }
}
