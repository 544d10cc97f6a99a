use std::path::Path;

use anyhow::Result;
use log::info;

use crate::table::Table;

/// Column names assigned to headerless BED files, in BED order.
pub const BED_COLUMNS: &[&str] = &["chrom", "start", "end", "name", "score", "strand"];

/// Read panel regions from `path`. Files ending in `.bed` have no header and get
/// [`BED_COLUMNS`] as names; any other file must start with a header line.
/// Coordinates are left exactly as written.
pub fn read_panel<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let is_bed = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bed"));

    let panel = if is_bed {
        super::read_tsv(path, Some(BED_COLUMNS))?
    } else {
        super::read_tsv(path, None)?
    };

    info!("Read {} panel regions from {}", panel.n_rows(), path.display());
    Ok(panel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bed_panels_are_headerless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.bed");
        std::fs::write(&path, "1\t100\t200\n2\t300\t400\n").unwrap();

        let panel = read_panel(&path).unwrap();
        assert_eq!(vec!["chrom", "start", "end"], panel.header());
        assert_eq!(2, panel.n_rows());
    }

    #[test]
    fn tsv_panels_use_their_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.tsv");
        std::fs::write(&path, "chr\tfrom\tto\n1\t100\t200\n").unwrap();

        let panel = read_panel(&path).unwrap();
        assert_eq!(vec!["chr", "from", "to"], panel.header());
    }
}
