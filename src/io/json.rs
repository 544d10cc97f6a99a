use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use indexmap::IndexMap;

/// Read colour palettes from a json file at `path`.
/// The json maps category names to objects mapping labels to colours, e.g.:
/// `
/// {
///     "pathology": { "BL": "#926CAD", "FL": "#EA8368" },
///     ... other categories ...
/// }
/// `
pub fn read_palettes<P: AsRef<Path>>(
    path: P,
) -> Result<IndexMap<String, IndexMap<String, String>>> {
    let file = File::open(&path)
        .with_context(|| format!("Could not read json {}", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let result = serde_json::from_reader(reader)
        .with_context(|| format!("Could not deserialize json {}", path.as_ref().display()))?;
    Ok(result)
}
