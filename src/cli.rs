//! # Command line interface for `sbs-exposure`
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::warn;

use crate::{
    io::{panel, MafSource},
    overlap::IntervalColumns,
    represented,
    table::Table,
    DEFAULT_GENOME_BUILD,
};

#[derive(Parser)]
#[command(
    name = "sbs-exposure",
    author,
    version,
    about = "SBS mutational signature exposures for tumour cohorts",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Size of the global thread pool requested by the subcommand.
    pub fn threads(&self) -> usize {
        match &self.command {
            Commands::Estimate { threads, .. } | Commands::Split { threads, .. } => *threads,
            _ => 1,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a cohort MAF, assign signatures with SigProfilerAssignment and scale
    /// exposures per sample
    Estimate {
        /// Cohort MAF file. Expected format is tab-separated with a header line
        #[arg(short, long)]
        maf: Option<String>,

        /// Directory in which the per-run working directory is created
        #[arg(long, default_value = ".")]
        output_dir: String,

        /// Name of the working directory. Generated if not given
        #[arg(long)]
        run_id: Option<String>,

        /// Reference genome build of the variant coordinates
        #[arg(long, default_value = DEFAULT_GENOME_BUILD)]
        genome_build: String,

        /// Keep per-sample MAFs and SigProfilerAssignment output after the run
        #[arg(long)]
        keep_temp: bool,

        #[command(flatten)]
        panel: PanelArgs,

        /// Python interpreter with SigProfilerAssignment installed
        #[arg(long, default_value = "python3")]
        python: String,

        /// COSMIC signature database version
        #[arg(long, default_value = "3.4")]
        cosmic_version: String,

        /// Write scaled exposures here instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Number of threads to use
        #[arg(long, default_value_t = 1, value_parser = threads_in_range)]
        threads: usize,
    },
    /// Split a cohort MAF into one MAF per tumour sample
    Split {
        /// Cohort MAF file. Expected format is tab-separated with a header line
        #[arg(short, long)]
        maf: Option<String>,

        /// Directory the per-sample MAFs are written to
        #[arg(long)]
        output_dir: String,

        #[command(flatten)]
        panel: PanelArgs,

        /// Number of threads to use
        #[arg(long, default_value_t = 1, value_parser = threads_in_range)]
        threads: usize,
    },
    /// Scale signature counts to per-sample proportions
    Scale {
        /// Activity table with a `Samples` column, e.g. `COSMIC_SBS96_Activities.txt`
        #[arg(short, long)]
        activities: String,

        #[arg(short, long)]
        output: Option<String>,
    },
    /// Keep signatures that are present in more than a fraction of samples
    Represented {
        /// Activity table with a `Samples` column
        #[arg(short, long)]
        activities: String,

        /// Fraction of samples a signature must be present in (exclusive)
        #[arg(long, default_value_t = represented::DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Substring identifying signature columns
        #[arg(long, default_value = represented::DEFAULT_MARKER)]
        marker: String,

        #[arg(short, long)]
        output: Option<String>,
    },
    /// Reshape an activity table to one row per sample and signature
    Long {
        /// Activity table with a `Samples` column
        #[arg(short, long)]
        activities: String,

        /// Label added to every row, e.g. the panel the exposures were computed on
        #[arg(long)]
        method: Option<String>,

        /// Only report the non-zero exposures of this sample
        #[arg(long)]
        sample: Option<String>,

        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the colours of a plotting category
    Palette {
        /// One of sbs, pairing_status, ffpe, pathology, lymphgen
        category: String,

        /// Read palettes from this json file instead of the built-in ones
        #[arg(long)]
        palette_file: Option<String>,

        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Panel restriction shared by `estimate` and `split`.
#[derive(Args)]
pub struct PanelArgs {
    /// Panel regions. `.bed` files are read without a header, other files need one
    #[arg(long)]
    pub panel: Option<String>,

    /// Only keep variants that overlap a panel region
    #[arg(long, requires = "panel")]
    pub subset_to_panel: bool,

    /// Panel column holding the chromosome
    #[arg(long, default_value = "chrom")]
    pub panel_chrom: String,

    /// Panel column holding the region start
    #[arg(long, default_value = "start")]
    pub panel_start: String,

    /// Panel column holding the region end
    #[arg(long, default_value = "end")]
    pub panel_end: String,
}

impl PanelArgs {
    /// The panel to restrict variants to, if restriction was requested.
    pub fn load(&self) -> Result<Option<Table>> {
        match (&self.panel, self.subset_to_panel) {
            (Some(path), true) => Ok(Some(panel::read_panel(path)?)),
            (Some(path), false) => {
                warn!("Panel {path} given without --subset-to-panel, not restricting variants");
                Ok(None)
            }
            (None, _) => Ok(None),
        }
    }
    pub fn columns(&self) -> IntervalColumns {
        IntervalColumns::new(&self.panel_chrom, &self.panel_start, &self.panel_end)
    }
}

/// Resolve the `--maf` argument of a subcommand.
pub fn maf_source(maf: Option<&str>) -> Result<MafSource> {
    MafSource::from_option(maf).context("No MAF given, pass one with --maf")
}

fn threads_in_range(s: &str) -> Result<usize> {
    let threads = s
        .parse()
        .context("Could not parse value passed to --threads to integer")?;
    if threads < 1 {
        bail!("--threads must be at least 1");
    }
    Ok(threads)
}
