//! # Selecting represented signatures
use anyhow::Result;
use indexmap::IndexMap;
use log::debug;

use crate::{activity::ActivityTable, error::ExposureError};

pub const DEFAULT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_MARKER: &str = "SBS";

/// Keep the signature columns (names containing `marker`) that are non-zero in
/// more than `threshold * n_samples` samples. The result holds the sample column
/// followed by the retained signature columns in their original order; all other
/// columns are dropped.
pub fn select_represented(
    activities: &ActivityTable,
    threshold: f64,
    marker: &str,
) -> Result<ActivityTable> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ExposureError::InvalidParameter(format!(
            "representation threshold must be between 0 and 1, got {threshold}"
        ))
        .into());
    }

    let min_samples = threshold * activities.n_samples() as f64;
    let mut columns = IndexMap::new();
    for (name, column) in activities.columns() {
        if !name.contains(marker) {
            continue;
        }
        let n_present = column
            .count_positive()
            .ok_or_else(|| ExposureError::InvalidColumnType {
                column: name.clone(),
            })?;
        if n_present as f64 > min_samples {
            columns.insert(name.clone(), column.clone());
        } else {
            debug!("Dropping {name}: present in {n_present} samples");
        }
    }

    ActivityTable::new(
        activities.sample_column(),
        activities.samples().to_vec(),
        columns,
    )
}
