//! # Utility functions for `sbs_exposure`
//!
//! Miscellaneous helpers that do not belong to a specific stage of the pipeline.
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Determine whether two ranges, each specified by their start and end
/// coordinates, overlap.
/// **NOTE:** start and end positions are inclusive
///
/// # Examples
///
/// ```
/// use sbs_exposure::utils::ranges_overlap;
///
/// assert!(ranges_overlap(10, 20, 15, 25));
/// assert!(ranges_overlap(10, 20, 20, 30));
/// assert!(!ranges_overlap(10, 20, 25, 30));
/// ```
pub fn ranges_overlap(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Whether `name` can be used as a single file name inside a directory.
///
/// # Examples
///
/// ```
/// use sbs_exposure::utils::is_plain_file_name;
///
/// assert!(is_plain_file_name("TCGA-AB-1234"));
/// assert!(!is_plain_file_name("../escape"));
/// assert!(!is_plain_file_name(".."));
/// ```
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Recursively collect all files below `dir` whose name ends with `suffix`,
/// sorted by path, component by component.
pub fn find_files_with_suffix<P: AsRef<Path>>(dir: P, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut pending = vec![dir.as_ref().to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries =
            fs::read_dir(&dir).with_context(|| format!("Could not list {}", dir.display()))?;
        for entry in entries {
            let path = entry
                .with_context(|| format!("Could not list {}", dir.display()))?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(suffix))
            {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}
