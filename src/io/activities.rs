use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use log::info;

use crate::activity::{ActivityTable, SAMPLES};

/// Read a signature activity table (e.g. `COSMIC_SBS96_Activities.txt`).
/// Sample ids are taken from the `Samples` column.
pub fn read_activities<P: AsRef<Path>>(path: P) -> Result<ActivityTable> {
    let path = path.as_ref();
    let table = super::read_tsv(path, None)?;
    let activities = ActivityTable::from_table(&table, SAMPLES)
        .with_context(|| format!("{} is not a valid activity table", path.display()))?;
    info!(
        "Read activities for {} samples from {}",
        activities.n_samples(),
        path.display()
    );
    Ok(activities)
}

pub fn write_activities<W: Write>(activities: &ActivityTable, writer: W) -> Result<()> {
    super::write_tsv(&activities.to_table()?, writer)
}
