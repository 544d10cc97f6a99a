//! # Signature assignment
//!
//! Decomposing mutations into signatures is left to an external tool.
//! [`SignatureAnalyzer`] is the seam between the pipeline and that tool;
//! [`SigProfiler`] runs SigProfilerAssignment in a Python interpreter.
use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{error::ExposureError, utils};

/// File name suffix of the activity tables written by SigProfilerAssignment.
pub const ACTIVITIES_SUFFIX: &str = "_Activities.txt";

pub trait SignatureAnalyzer {
    /// Assign signatures to the mutations of every sample file in `input_dir`,
    /// writing results (including at least one `*_Activities.txt`) below `output_dir`.
    /// Blocks until the assignment has finished.
    fn assign(&self, input_dir: &Path, output_dir: &Path, genome_build: &str) -> Result<()>;
}

/// Python snippet calling `cosmic_fit`. Arguments are taken from `sys.argv`:
/// samples, output, genome build, context type, input type, COSMIC version.
const COSMIC_FIT_PY: &str = r#"
import sys
from SigProfilerAssignment import Analyzer as Analyze

Analyze.cosmic_fit(
    samples=sys.argv[1],
    output=sys.argv[2],
    genome_build=sys.argv[3],
    context_type=sys.argv[4],
    input_type=sys.argv[5],
    cosmic_version=float(sys.argv[6]),
)
"#;

/// SigProfilerAssignment, run out of process.
#[derive(Debug, Clone)]
pub struct SigProfiler {
    pub python: PathBuf,
    pub cosmic_version: String,
    pub context_type: String,
    pub input_type: String,
}

impl Default for SigProfiler {
    fn default() -> Self {
        Self {
            python: PathBuf::from("python3"),
            cosmic_version: String::from("3.4"),
            context_type: String::from("96"),
            input_type: String::from("vcf"),
        }
    }
}

impl SigProfiler {
    pub fn new<P: AsRef<Path>>(python: P) -> Self {
        Self {
            python: python.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    fn command(&self, input_dir: &Path, output_dir: &Path, genome_build: &str) -> Command {
        let mut command = Command::new(&self.python);
        command
            .arg("-c")
            .arg(COSMIC_FIT_PY)
            .arg(input_dir)
            .arg(output_dir)
            .arg(genome_build)
            .arg(&self.context_type)
            .arg(&self.input_type)
            .arg(&self.cosmic_version);
        command
    }
}

impl SignatureAnalyzer for SigProfiler {
    fn assign(&self, input_dir: &Path, output_dir: &Path, genome_build: &str) -> Result<()> {
        info!("Running SigProfilerAssignment on {}", input_dir.display());
        let output = self
            .command(input_dir, output_dir, genome_build)
            .output()
            .with_context(|| format!("Could not start {}", self.python.display()))?;

        debug!(
            "SigProfilerAssignment stdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        );
        if !output.status.success() {
            return Err(ExposureError::AnalyzerFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }
        Ok(())
    }
}

/// The first `*_Activities.txt` below `dir`, in lexicographic path order.
pub fn find_activities<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let mut found = utils::find_files_with_suffix(dir, ACTIVITIES_SUFFIX)?;
    if found.is_empty() {
        return Err(ExposureError::ActivitiesNotFound(dir.to_path_buf()).into());
    }
    if found.len() > 1 {
        debug!("Found {} activity tables, using the first", found.len());
    }
    Ok(found.swap_remove(0))
}
