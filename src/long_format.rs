//! # Long-format exposures
//!
//! Plotting front-ends want one row per (sample, signature) pair rather than one
//! column per signature. [`to_long`] reshapes an [`ActivityTable`] accordingly and
//! [`for_sample`] picks out the rows of a single sample for a stacked view.
use std::io::Write;

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;

use crate::activity::ActivityTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureRecord {
    pub sample: String,
    pub signature: String,
    pub exposure: f64,
    /// Label of the method or panel that produced the exposure, used as the
    /// comparison category when several runs are plotted together.
    pub method: Option<String>,
}

/// One record per sample and numeric column, samples in table order and
/// signatures in column order. Text columns are skipped.
pub fn to_long(activities: &ActivityTable, method: Option<&str>) -> Vec<ExposureRecord> {
    let mut records = Vec::new();
    for (row, sample) in activities.samples().iter().enumerate() {
        for (signature, column) in activities.columns() {
            let Some(exposure) = column.get_f64(row) else {
                continue;
            };
            records.push(ExposureRecord {
                sample: sample.clone(),
                signature: signature.clone(),
                exposure,
                method: method.map(String::from),
            });
        }
    }
    records
}

/// Records of `sample` with a positive exposure.
pub fn for_sample<'a>(records: &'a [ExposureRecord], sample: &str) -> Vec<&'a ExposureRecord> {
    records
        .iter()
        .filter(|r| r.sample == sample && r.exposure > 0.0)
        .collect()
}

/// Write records as tab-separated text with a `sample signature exposure method` header.
pub fn write_long<'a, W, I>(records: I, writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ExposureRecord>,
{
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{activity::SAMPLES, table::Table};

    fn scaled() -> ActivityTable {
        let table = Table::from_rows(
            &["Samples", "SBS1", "SBS5", "Cohort"],
            &[&["S1", "0.25", "0.75", "a"], &["S2", "0", "1", "b"]],
        )
        .unwrap();
        ActivityTable::from_table(&table, SAMPLES).unwrap()
    }

    #[test]
    fn one_record_per_sample_and_signature() {
        let records = to_long(&scaled(), Some("exome"));
        assert_eq!(4, records.len());
        assert_eq!("S1", records[1].sample);
        assert_eq!("SBS5", records[1].signature);
        assert_eq!(0.75, records[1].exposure);
        assert_eq!(Some("exome".to_string()), records[1].method);
    }

    #[test]
    fn sample_view_skips_absent_signatures() {
        let records = to_long(&scaled(), None);
        let s2 = for_sample(&records, "S2");
        assert_eq!(1, s2.len());
        assert_eq!("SBS5", s2[0].signature);
    }

    #[test]
    fn long_table_is_tab_separated() {
        let records = to_long(&scaled(), Some("panel"));
        let mut buffer = Vec::new();
        write_long(for_sample(&records, "S1"), &mut buffer).unwrap();
        assert_eq!(
            "sample\tsignature\texposure\tmethod\nS1\tSBS1\t0.25\tpanel\nS1\tSBS5\t0.75\tpanel\n",
            String::from_utf8(buffer).unwrap()
        );
    }
}
