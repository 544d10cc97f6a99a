//! # Splitting a cohort MAF into per-sample MAFs
use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    error::ExposureError,
    io::{maf, MafSource},
    overlap::{overlap, IntervalColumns},
    table::Table,
    utils,
};

/// Restrict variants to the regions of `panel` before they are written.
#[derive(Debug, Clone)]
pub struct PanelFilter<'a> {
    pub panel: &'a Table,
    pub variant_cols: IntervalColumns,
    pub panel_cols: IntervalColumns,
}

impl<'a> PanelFilter<'a> {
    /// Filter with the default MAF and panel column names.
    pub fn new(panel: &'a Table) -> Self {
        Self {
            panel,
            variant_cols: IntervalColumns::maf(),
            panel_cols: IntervalColumns::panel(),
        }
    }
    pub fn with_panel_columns(mut self, panel_cols: IntervalColumns) -> Self {
        self.panel_cols = panel_cols;
        self
    }
    pub fn apply(&self, variants: &Table) -> Result<Table> {
        overlap(variants, self.panel, &self.variant_cols, &self.panel_cols)
    }
}

/// The variants of one sample and the file they were written to.
#[derive(Debug, Clone)]
pub struct SampleMaf {
    pub sample_id: String,
    pub path: PathBuf,
    pub table: Table,
}

/// Load the MAF from `source` and write one `{sample_id}.maf` per tumour sample
/// into `output_dir`, which is created if needed. With a `panel_filter`, only
/// variants overlapping the panel are written.
///
/// Rows without a sample id are dropped, as are samples with no variants left
/// after panel filtering; neither produces a file. The written tables are
/// returned in order of each sample's first appearance in the MAF.
pub fn split_by_sample<P: AsRef<Path>>(
    source: MafSource,
    output_dir: P,
    panel_filter: Option<&PanelFilter>,
) -> Result<Vec<SampleMaf>> {
    info!("Preprocessing incoming MAF");
    let maf = source.load()?;
    split_table(&maf, output_dir.as_ref(), panel_filter)
}

fn split_table(
    maf: &Table,
    output_dir: &Path,
    panel_filter: Option<&PanelFilter>,
) -> Result<Vec<SampleMaf>> {
    maf::check_required_columns(maf)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Could not create directory {}", output_dir.display()))?;

    let groups = maf.group_by(maf::TUMOR_SAMPLE_BARCODE)?;
    let mut written = Vec::with_capacity(groups.len());

    for (sample_id, rows) in groups {
        if sample_id.trim().is_empty() {
            debug!("Skipping {} variants without a sample id", rows.len());
            continue;
        }
        if !utils::is_plain_file_name(sample_id) {
            return Err(ExposureError::InvalidSampleId(sample_id.to_string()).into());
        }

        let mut table = maf.select_rows(&rows);
        if let Some(filter) = panel_filter {
            table = filter
                .apply(&table)
                .with_context(|| format!("Could not restrict sample {sample_id} to panel"))?;
        }
        if table.is_empty() {
            debug!("No variants left for sample {sample_id}, not writing a MAF");
            continue;
        }

        let path = output_dir.join(format!("{sample_id}.maf"));
        maf::write_maf(&table, &path)?;
        written.push(SampleMaf {
            sample_id: sample_id.to_string(),
            path,
            table,
        });
    }

    info!(
        "Wrote {} per-sample MAFs to {}",
        written.len(),
        output_dir.display()
    );
    Ok(written)
}
