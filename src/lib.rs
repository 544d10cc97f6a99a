//! # sbs_exposure
//!
//! Estimates single base substitution (SBS) mutational signature exposures for a
//! cohort of tumour samples. A cohort MAF is split into one MAF per sample,
//! optionally restricted to the regions of a sequencing panel, handed to
//! SigProfilerAssignment and the resulting signature counts are scaled to
//! per-sample proportions.
//!
//! The individual steps live in their own modules ([`split`], [`overlap`],
//! [`scale`], [`represented`]); [`estimate_exposure`] runs them in order.
pub mod activity;
pub mod analyzer;
pub mod cli;
pub mod error;
pub mod io;
pub mod long_format;
pub mod overlap;
pub mod palette;
pub mod represented;
pub mod scale;
pub mod split;
pub mod table;
pub mod utils;
pub mod workdir;

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::{
    activity::ActivityTable, analyzer::SignatureAnalyzer, io::MafSource, split::PanelFilter,
    workdir::RunDirectory,
};

pub const DEFAULT_GENOME_BUILD: &str = "GRCh37";

/// Settings of a single [`estimate_exposure`] run.
#[derive(Debug, Clone)]
pub struct ExposureOptions {
    /// Parent of the per-run working directory.
    pub output_dir: PathBuf,
    /// Name of the working directory below `output_dir`. Generated when `None`.
    pub run_id: Option<String>,
    pub genome_build: String,
    /// Remove the working directory once exposures have been computed.
    pub clear_temp_outputs: bool,
}

impl Default for ExposureOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            run_id: None,
            genome_build: DEFAULT_GENOME_BUILD.to_string(),
            clear_temp_outputs: true,
        }
    }
}

/// Split the MAF from `source` into per-sample MAFs in the run's working
/// directory, assign signatures with `analyzer` and scale the resulting
/// activities to proportions.
///
/// Any failure aborts the run and leaves the working directory in place for
/// inspection. It is only removed (if `clear_temp_outputs` is set) once the
/// scaled table has been computed.
pub fn estimate_exposure(
    options: &ExposureOptions,
    source: MafSource,
    panel_filter: Option<&PanelFilter>,
    analyzer: &dyn SignatureAnalyzer,
) -> Result<ActivityTable> {
    let run = RunDirectory::new(&options.output_dir, options.run_id.as_deref())?;
    info!("Starting run {} in {}", run.run_id(), run.path().display());

    let written = split::split_by_sample(source, run.path(), panel_filter)?;
    info!("Assigning signatures for {} samples", written.len());
    analyzer
        .assign(run.path(), run.path(), &options.genome_build)
        .with_context(|| format!("Signature assignment failed for run {}", run.run_id()))?;

    let activities_path = analyzer::find_activities(run.path())?;
    info!("Scaling exposures from {}", activities_path.display());
    let scaled = scale::scale_exposure_file(&activities_path)?;

    if options.clear_temp_outputs {
        run.remove();
    }
    Ok(scaled)
}
