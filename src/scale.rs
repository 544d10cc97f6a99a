//! # Relative signature exposure
//!
//! Signature assignment reports how many mutations of each sample are attributed
//! to each signature. [`scale_exposure`] turns those counts into proportions of
//! the sample's total, so that samples with very different mutation burdens can
//! be compared.
use std::path::Path;

use anyhow::Result;
use indexmap::IndexMap;
use log::{info, warn};
use ndarray::prelude::*;

use crate::{
    activity::{ActivityTable, Column},
    io::activities::read_activities,
};

/// Divide every integer (count) column by the per-sample sum of all integer columns.
/// Scaled columns become [`Column::Float`]; float and text columns are left alone.
///
/// A sample whose counts sum to 0 has no defined proportions: all of its scaled
/// values are NaN and callers have to filter or check for them.
pub fn scale_exposure(activities: &ActivityTable) -> Result<ActivityTable> {
    let count_columns: Vec<&str> = activities
        .columns()
        .iter()
        .filter(|(_, c)| matches!(c, Column::Integer(_)))
        .map(|(name, _)| name.as_str())
        .collect();

    let mut counts = Array2::<f64>::zeros((activities.n_samples(), count_columns.len()));
    for (j, name) in count_columns.iter().enumerate() {
        if let Some(Column::Integer(values)) = activities.column(name) {
            for (i, value) in values.iter().enumerate() {
                counts[[i, j]] = *value as f64;
            }
        }
    }

    let totals = counts.sum_axis(Axis(1));
    for ((mut row, total), sample) in counts
        .rows_mut()
        .into_iter()
        .zip(totals.iter())
        .zip(activities.samples())
    {
        if *total == 0.0 {
            warn!("Sample {sample} has no attributed mutations, its exposures are NaN");
            row.fill(f64::NAN);
        } else {
            row.mapv_inplace(|v| v / total);
        }
    }

    let mut columns = IndexMap::new();
    for (name, column) in activities.columns() {
        let column = match count_columns.iter().position(|c| *c == name.as_str()) {
            Some(j) => Column::Float(counts.column(j).to_vec()),
            None => column.clone(),
        };
        columns.insert(name.clone(), column);
    }

    ActivityTable::new(
        activities.sample_column(),
        activities.samples().to_vec(),
        columns,
    )
}

/// Read the activity table at `path` and scale it.
pub fn scale_exposure_file<P: AsRef<Path>>(path: P) -> Result<ActivityTable> {
    info!("Scaling SBS exposure per sample");
    let activities = read_activities(path)?;
    scale_exposure(&activities)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{activity::SAMPLES, table::Table};

    fn activities(rows: &[&[&str]]) -> ActivityTable {
        let table = Table::from_rows(&["Samples", "SBS1", "SBS5", "Purity"], rows).unwrap();
        ActivityTable::from_table(&table, SAMPLES).unwrap()
    }

    #[test]
    fn counts_become_proportions() {
        let scaled = scale_exposure(&activities(&[&["S1", "30", "70", "0.8"]])).unwrap();
        assert_relative_eq!(0.3, scaled.get("S1", "SBS1").unwrap());
        assert_relative_eq!(0.7, scaled.get("S1", "SBS5").unwrap());
    }

    #[test]
    fn rows_sum_to_one() {
        let scaled = scale_exposure(&activities(&[
            &["S1", "3", "7", "0.8"],
            &["S2", "1", "2", "0.5"],
            &["S3", "999", "1", "0.1"],
        ]))
        .unwrap();
        for sample in scaled.samples() {
            let total = scaled.get(sample, "SBS1").unwrap() + scaled.get(sample, "SBS5").unwrap();
            assert_relative_eq!(1.0, total, epsilon = 1e-12);
        }
    }

    #[test]
    fn non_count_columns_are_untouched() {
        let scaled = scale_exposure(&activities(&[&["S1", "30", "70", "0.8"]])).unwrap();
        assert_eq!(Some(&Column::Float(vec![0.8])), scaled.column("Purity"));
        let names: Vec<&str> = scaled.column_names().collect();
        assert_eq!(vec!["SBS1", "SBS5", "Purity"], names);
    }

    #[test]
    fn zero_total_gives_nan() {
        let scaled = scale_exposure(&activities(&[
            &["S1", "0", "0", "0.8"],
            &["S2", "5", "5", "0.5"],
        ]))
        .unwrap();
        assert!(scaled.get("S1", "SBS1").unwrap().is_nan());
        assert!(scaled.get("S1", "SBS5").unwrap().is_nan());
        assert_relative_eq!(0.5, scaled.get("S2", "SBS5").unwrap());
    }

    #[test]
    fn empty_table_scales_to_empty_table() {
        let scaled = scale_exposure(&activities(&[])).unwrap();
        assert_eq!(0, scaled.n_samples());
    }
}
