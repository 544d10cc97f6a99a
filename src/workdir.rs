//! # Per-run working directories
//!
//! Intermediate files of a run (per-sample MAFs and the output of the signature
//! assignment tool) go to `output_dir/run_id`, so runs sharing an `output_dir`
//! never see each other's files.
use std::{
    fs,
    path::{Path, PathBuf},
    process,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Result;
use log::{debug, warn};
use sha2::{Digest, Sha256};

use crate::{error::ExposureError, utils};

const RUN_ID_LEN: usize = 12;

#[derive(Debug, Clone)]
pub struct RunDirectory {
    run_id: String,
    path: PathBuf,
}

impl RunDirectory {
    /// Working directory for `run_id` below `output_dir`. Without a `run_id`
    /// one is generated.
    pub fn new<P: AsRef<Path>>(output_dir: P, run_id: Option<&str>) -> Result<Self> {
        let output_dir = output_dir.as_ref();
        let run_id = match run_id {
            Some(id) if utils::is_plain_file_name(id) => id.to_string(),
            Some(id) => {
                return Err(ExposureError::InvalidParameter(format!(
                    "run id '{id}' cannot be used as a directory name"
                ))
                .into())
            }
            None => generate_run_id(output_dir),
        };
        let path = output_dir.join(&run_id);
        debug!("Using working directory {}", path.display());
        Ok(Self { run_id, path })
    }
    pub fn run_id(&self) -> &str {
        &self.run_id
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    /// Delete the directory and everything in it. Failures are logged, not returned.
    pub fn remove(&self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            warn!("Could not remove {}: {e}", self.path.display());
        }
    }
}

/// Short hex digest of the process id, the current time and `output_dir`.
pub fn generate_run_id(output_dir: &Path) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(process::id().to_le_bytes());
    hasher.update(nanos.to_le_bytes());
    hasher.update(output_dir.as_os_str().as_encoded_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..RUN_ID_LEN].to_string()
}
