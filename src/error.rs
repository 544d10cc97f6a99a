//! # Error types for `sbs_exposure`
//!
//! Failures that callers may want to match on are variants of [`ExposureError`].
//! The rest of the crate returns `anyhow::Result`, so these values usually travel
//! wrapped in an `anyhow::Error` and can be recovered with `downcast_ref`.
use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExposureError {
    #[error("No MAF input supplied: provide MAF data as a path to a file or as an in-memory table")]
    InputMissing,

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Invalid coordinate '{value}' in column '{column}' at row {row}")]
    InvalidCoordinate {
        value: String,
        column: String,
        row: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Column '{column}' is not numeric")]
    InvalidColumnType { column: String },

    #[error("Sample id '{0}' cannot be used as a file name")]
    InvalidSampleId(String),

    #[error("No *_Activities.txt file found under {}", .0.display())]
    ActivitiesNotFound(PathBuf),

    #[error("Signature analyzer exited with {status}: {stderr}")]
    AnalyzerFailed { status: ExitStatus, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
