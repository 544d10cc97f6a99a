use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use log::info;
use rayon::ThreadPoolBuilder;
use sbs_exposure::{
    analyzer::SigProfiler,
    cli::{self, Cli, Commands},
    estimate_exposure,
    io::{activities, output_writer},
    long_format,
    palette::{self, Palettes},
    represented, scale,
    split::{self, PanelFilter},
    ExposureOptions,
};

fn main() -> Result<()> {
    // Initialize the logger. If the log level is not set via `RUST_LOG`, set it to 'info' by default
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Cli::parse();
    ThreadPoolBuilder::new()
        .num_threads(config.threads())
        .build_global()?;

    match config.command {
        Commands::Estimate {
            maf,
            output_dir,
            run_id,
            genome_build,
            keep_temp,
            panel,
            python,
            cosmic_version,
            output,
            threads: _,
        } => {
            let source = cli::maf_source(maf.as_deref())?;
            let panel_table = panel.load()?;
            let panel_filter = panel_table
                .as_ref()
                .map(|t| PanelFilter::new(t).with_panel_columns(panel.columns()));

            let options = ExposureOptions {
                output_dir: PathBuf::from(output_dir),
                run_id,
                genome_build,
                clear_temp_outputs: !keep_temp,
            };
            let analyzer = SigProfiler {
                cosmic_version,
                ..SigProfiler::new(python)
            };

            let scaled = estimate_exposure(&options, source, panel_filter.as_ref(), &analyzer)?;
            activities::write_activities(&scaled, output_writer(output.as_deref())?)?;
            info!("Finished estimating exposures for {} samples", scaled.n_samples());
        }
        Commands::Split {
            maf,
            output_dir,
            panel,
            threads: _,
        } => {
            let source = cli::maf_source(maf.as_deref())?;
            let panel_table = panel.load()?;
            let panel_filter = panel_table
                .as_ref()
                .map(|t| PanelFilter::new(t).with_panel_columns(panel.columns()));
            split::split_by_sample(source, &output_dir, panel_filter.as_ref())?;
        }
        Commands::Scale {
            activities: path,
            output,
        } => {
            let scaled = scale::scale_exposure_file(&path)?;
            activities::write_activities(&scaled, output_writer(output.as_deref())?)?;
        }
        Commands::Represented {
            activities: path,
            threshold,
            marker,
            output,
        } => {
            let table = activities::read_activities(&path)?;
            let selected = represented::select_represented(&table, threshold, &marker)?;
            activities::write_activities(&selected, output_writer(output.as_deref())?)?;
        }
        Commands::Long {
            activities: path,
            method,
            sample,
            output,
        } => {
            let table = activities::read_activities(&path)?;
            let records = long_format::to_long(&table, method.as_deref());
            let writer = output_writer(output.as_deref())?;
            match sample {
                Some(sample) => {
                    long_format::write_long(long_format::for_sample(&records, &sample), writer)?
                }
                None => long_format::write_long(&records, writer)?,
            }
        }
        Commands::Palette {
            category,
            palette_file,
            output,
        } => {
            let custom;
            let palettes = match palette_file {
                Some(path) => {
                    custom = Palettes::from_path(&path)?;
                    &custom
                }
                None => palette::palettes()?,
            };
            let colours = palettes
                .category(&category)
                .with_context(|| format!("Unknown palette category {category}"))?;
            let mut writer = csv::WriterBuilder::new()
                .delimiter(b'\t')
                .from_writer(output_writer(output.as_deref())?);
            for (label, colour) in colours {
                writer.write_record([label, colour])?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
