use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{error::ExposureError, table::Table};

pub const CHROMOSOME: &str = "Chromosome";
pub const START_POSITION: &str = "Start_Position";
pub const END_POSITION: &str = "End_Position";
pub const TUMOR_SAMPLE_BARCODE: &str = "Tumor_Sample_Barcode";

/// Columns every MAF needs for splitting and panel restriction.
pub const REQUIRED_COLUMNS: &[&str] = &[
    CHROMOSOME,
    START_POSITION,
    END_POSITION,
    TUMOR_SAMPLE_BARCODE,
];

/// The standard MAF header.
pub const MAF_COLUMNS: &[&str] = &[
    "Hugo_Symbol",
    "Entrez_Gene_Id",
    "Center",
    "NCBI_Build",
    CHROMOSOME,
    START_POSITION,
    END_POSITION,
    "Strand",
    "Variant_Classification",
    "Variant_Type",
    "Reference_Allele",
    "Tumor_Seq_Allele1",
    "Tumor_Seq_Allele2",
    "dbSNP_RS",
    "dbSNP_Val_Status",
    TUMOR_SAMPLE_BARCODE,
    "Matched_Norm_Sample_Barcode",
    "Match_Norm_Seq_Allele1",
    "Match_Norm_Seq_Allele2",
    "Tumor_Validation_Allele1",
    "Tumor_Validation_Allele2",
    "Match_Norm_Validation_Allele1",
    "Match_Norm_Validation_Allele2",
    "Verification_Status",
    "Validation_Status",
    "Mutation_Status",
    "Sequencing_Phase",
    "Sequence_Source",
    "Validation_Method",
    "Score",
    "BAM_File",
    "Sequencer",
    "Tumor_Sample_UUID",
    "Matched_Norm_Sample_UUID",
    "HGVSc",
    "HGVSp",
    "HGVSp_Short",
    "Transcript_ID",
    "Exon_Number",
    "t_depth",
    "t_ref_count",
    "t_alt_count",
    "n_depth",
    "n_ref_count",
    "n_alt_count",
];

/// Read a MAF file at `path`. All fields are kept as text, `#` lines
/// (e.g. `#version 2.4`) are skipped and the required columns must be present.
pub fn read_maf<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let maf = super::read_tsv(path, None)?;
    check_required_columns(&maf).with_context(|| format!("{} is not a valid MAF", path.display()))?;
    let missing = missing_standard_columns(&maf);
    if !missing.is_empty() {
        debug!("{} lacks standard MAF columns {missing:?}", path.display());
    }
    info!("Read {} variants from {}", maf.n_rows(), path.display());
    Ok(maf)
}

pub fn write_maf<P: AsRef<Path>>(maf: &Table, path: P) -> Result<()> {
    super::write_tsv_to_path(maf, path)
}

pub fn check_required_columns(maf: &Table) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if maf.position(column).is_none() {
            return Err(ExposureError::MissingColumn(column.to_string()).into());
        }
    }
    Ok(())
}

/// Names of the standard MAF columns absent from `maf`.
pub fn missing_standard_columns(maf: &Table) -> Vec<&'static str> {
    MAF_COLUMNS
        .iter()
        .copied()
        .filter(|c| maf.position(c).is_none())
        .collect()
}
