use std::{fs, io, path::Path};

use anyhow::Result;
use approx::assert_relative_eq;
use hex_literal::hex;
use sha2::{Digest, Sha256};

use sbs_exposure::{
    analyzer::SignatureAnalyzer,
    estimate_exposure,
    io::{activities, maf, panel, MafSource},
    long_format,
    overlap::{overlap, IntervalColumns},
    represented, scale,
    split::{split_by_sample, PanelFilter},
    ExposureOptions,
};

const TEST_DATA_DIR: &str = "./tests/data/";
const MAF_FILE: &str = "cohort.maf";
const BED_PANEL_FILE: &str = "panel.bed";
const TSV_PANEL_FILE: &str = "panel.tsv";
const ACTIVITIES_FILE: &str = "COSMIC_SBS96_Activities.txt";

fn sha256_file_digest<P: AsRef<Path>>(path: P) -> Vec<u8> {
    let mut file = fs::File::open(&path)
        .unwrap_or_else(|_| panic!("Failed to open file: {}", path.as_ref().display()));
    let mut hasher = Sha256::new();
    _ = io::copy(&mut file, &mut hasher)
        .unwrap_or_else(|_| panic!("Failed to read from file: {}", path.as_ref().display()));
    hasher.finalize().to_vec()
}

fn data<P: AsRef<Path>>(file: P) -> std::path::PathBuf {
    Path::new(TEST_DATA_DIR).join(file)
}

/// Copies the fixture activity table into the output directory, the way
/// SigProfilerAssignment lays out its results.
struct CannedAnalyzer;

impl SignatureAnalyzer for CannedAnalyzer {
    fn assign(&self, input_dir: &Path, output_dir: &Path, _genome_build: &str) -> Result<()> {
        assert!(input_dir.join("DLBCL-001.maf").exists());
        let dir = output_dir
            .join("Assignment_Solution")
            .join("Activities");
        fs::create_dir_all(&dir)?;
        fs::copy(data(ACTIVITIES_FILE), dir.join("Assignment_Solution_Activities.txt"))?;
        Ok(())
    }
}

#[test]
/// Check the input files used for integration tests.
/// If this test fails, it means one or more of the input files have changed.
/// This is a problem if tests are not updated to reflect the new input files.
fn check_input_files() {
    // Check cohort MAF
    let expect = hex!("1541c6b74f6a0a20ae00c01574da06a0b4dc169eb945f34ef3585e9840b8a32e");
    assert_eq!(sha256_file_digest(data(MAF_FILE))[..], expect[..]);

    // Check headerless panel
    let expect = hex!("4f214ee65f7a1efb1ac3b7e6045c1c574daed16402f2a51de71fa434847f45d4");
    assert_eq!(sha256_file_digest(data(BED_PANEL_FILE))[..], expect[..]);

    // Check panel with custom column names
    let expect = hex!("95846a2ebe66c5571c28a83200a8d41ef74ce84da4ef1d526bc6c9f4c3e0102c");
    assert_eq!(sha256_file_digest(data(TSV_PANEL_FILE))[..], expect[..]);

    // Check activity table
    let expect = hex!("9bed599cf9cef708f280979cc35e5824be03bc2cfbe125304676b3fbc6b9b7e5");
    assert_eq!(sha256_file_digest(data(ACTIVITIES_FILE))[..], expect[..]);
}

#[test]
fn split_cohort_maf() {
    let dir = tempfile::tempdir().unwrap();
    let written = split_by_sample(MafSource::from(data(MAF_FILE)), dir.path(), None).unwrap();

    let ids: Vec<&str> = written.iter().map(|s| s.sample_id.as_str()).collect();
    assert_eq!(vec!["DLBCL-001", "DLBCL-002", "DLBCL-003", "DLBCL-004"], ids);
    // one variant has no sample id
    let total: usize = written.iter().map(|s| s.table.n_rows()).sum();
    assert_eq!(8, total);

    let s2 = maf::read_maf(dir.path().join("DLBCL-002.maf")).unwrap();
    assert_eq!(written[1].table, s2);
    assert_eq!(
        vec!["MYD88", "CD79B"],
        s2.column("Hugo_Symbol").unwrap().collect::<Vec<_>>()
    );
}

#[test]
fn split_restricted_to_bed_panel() {
    let dir = tempfile::tempdir().unwrap();
    let regions = panel::read_panel(data(BED_PANEL_FILE)).unwrap();
    let filter = PanelFilter::new(&regions);
    let written =
        split_by_sample(MafSource::from(data(MAF_FILE)), dir.path(), Some(&filter)).unwrap();

    let counts: Vec<(&str, usize)> = written
        .iter()
        .map(|s| (s.sample_id.as_str(), s.table.n_rows()))
        .collect();
    assert_eq!(
        vec![("DLBCL-001", 2), ("DLBCL-002", 1), ("DLBCL-003", 1)],
        counts
    );
    assert!(!dir.path().join("DLBCL-004.maf").exists());
}

#[test]
fn overlap_with_custom_panel_columns() {
    let variants = maf::read_maf(data(MAF_FILE)).unwrap();
    let regions = panel::read_panel(data(TSV_PANEL_FILE)).unwrap();
    let hits = overlap(
        &variants,
        &regions,
        &IntervalColumns::maf(),
        &IntervalColumns::new("chromosome", "region_start", "region_end"),
    )
    .unwrap();

    assert_eq!(variants.header(), hits.header());
    assert_eq!(
        vec!["TP53", "BCL2", "MYD88", "CREBBP"],
        hits.column("Hugo_Symbol").unwrap().collect::<Vec<_>>()
    );
}

#[test]
fn scale_activity_file() {
    let scaled = scale::scale_exposure_file(data(ACTIVITIES_FILE)).unwrap();

    assert_relative_eq!(0.3, scaled.get("DLBCL-001", "SBS1").unwrap());
    assert_relative_eq!(0.7, scaled.get("DLBCL-001", "SBS5").unwrap());
    assert_relative_eq!(10.0 / 21.0, scaled.get("DLBCL-004", "SBS9").unwrap());
    // no mutations assigned at all
    assert!(scaled.get("DLBCL-003", "SBS1").unwrap().is_nan());

    for sample in ["DLBCL-001", "DLBCL-002", "DLBCL-004"] {
        let total: f64 = scaled
            .column_names()
            .filter_map(|c| scaled.get(sample, c))
            .sum();
        assert_relative_eq!(1.0, total, epsilon = 1e-12);
    }
}

#[test]
fn represented_signatures() {
    let table = activities::read_activities(data(ACTIVITIES_FILE)).unwrap();

    let selected = represented::select_represented(&table, 0.1, "SBS").unwrap();
    let names: Vec<&str> = selected.column_names().collect();
    assert_eq!(vec!["SBS1", "SBS5", "SBS9", "SBS17b"], names);

    let selected = represented::select_represented(&table, 0.5, "SBS").unwrap();
    let names: Vec<&str> = selected.column_names().collect();
    assert_eq!(vec!["SBS1", "SBS5"], names);
}

#[test]
fn estimate_exposure_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let options = ExposureOptions {
        output_dir: dir.path().to_path_buf(),
        run_id: Some("integration".to_string()),
        ..ExposureOptions::default()
    };
    let scaled = estimate_exposure(
        &options,
        MafSource::from(data(MAF_FILE)),
        None,
        &CannedAnalyzer,
    )
    .unwrap();

    assert_eq!(4, scaled.n_samples());
    assert_relative_eq!(0.5, scaled.get("DLBCL-002", "SBS5").unwrap());
    assert!(!dir.path().join("integration").exists());

    let records = long_format::to_long(&scaled, Some("exome"));
    let dlbcl_002: Vec<&str> = long_format::for_sample(&records, "DLBCL-002")
        .iter()
        .map(|r| r.signature.as_str())
        .collect();
    assert_eq!(vec!["SBS1", "SBS5", "SBS9"], dlbcl_002);
}
