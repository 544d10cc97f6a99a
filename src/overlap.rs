//! # Restricting variants to panel regions
//!
//! [`overlap`] joins a variant table with a table of panel regions on chromosome
//! and keeps the variants whose span intersects a region. Both intervals are
//! closed, so a variant ending on the first base of a region overlaps it.
//! Every matching (variant, region) pair produces one output row, so a variant
//! that falls in two regions is reported twice.
use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use log::{debug, trace};
use rayon::prelude::*;

use crate::{error::ExposureError, io::maf, table::Table, utils};

/// Above this many variants both inputs are partitioned by chromosome and each
/// chromosome is joined on its own.
pub const PARTITION_THRESHOLD: usize = 50_000;

/// Names of the columns holding an interval's chromosome, start and end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalColumns {
    pub chrom: String,
    pub start: String,
    pub end: String,
}

impl IntervalColumns {
    pub fn new(chrom: &str, start: &str, end: &str) -> Self {
        Self {
            chrom: chrom.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }
    /// `Chromosome`, `Start_Position`, `End_Position`
    pub fn maf() -> Self {
        Self::new(maf::CHROMOSOME, maf::START_POSITION, maf::END_POSITION)
    }
    /// `chrom`, `start`, `end`
    pub fn panel() -> Self {
        Self::new("chrom", "start", "end")
    }
}

#[derive(Debug, Clone, Copy)]
struct Interval<'a> {
    chrom: &'a str,
    start: i64,
    end: i64,
}

/// Panel regions per chromosome, in panel order.
type RegionIndex<'a> = HashMap<&'a str, Vec<(i64, i64)>>;

/// Return the rows of `variants` that overlap at least one region in `panel`,
/// once per overlapping region. Only the columns of `variants` are kept.
pub fn overlap(
    variants: &Table,
    panel: &Table,
    variant_cols: &IntervalColumns,
    panel_cols: &IntervalColumns,
) -> Result<Table> {
    let variant_intervals = parse_intervals(variants, variant_cols)?;
    let panel_intervals = parse_intervals(panel, panel_cols)?;

    let hits = if variant_intervals.len() > PARTITION_THRESHOLD {
        debug!(
            "{} variants exceed {PARTITION_THRESHOLD}, joining per chromosome",
            variant_intervals.len()
        );
        partitioned_join(&variant_intervals, &panel_intervals)
    } else {
        global_join(&variant_intervals, &panel_intervals)
    };

    Ok(variants.select_rows(&hits))
}

fn parse_intervals<'a>(table: &'a Table, cols: &IntervalColumns) -> Result<Vec<Interval<'a>>> {
    let chrom_idx = table.column_index(&cols.chrom)?;
    let start_idx = table.column_index(&cols.start)?;
    let end_idx = table.column_index(&cols.end)?;

    let coordinate = |row: usize, idx: usize, column: &str| -> Result<i64> {
        let value = table.rows()[row][idx].trim();
        value.parse::<i64>().map_err(|_| {
            ExposureError::InvalidCoordinate {
                value: value.to_string(),
                column: column.to_string(),
                row,
            }
            .into()
        })
    };

    (0..table.n_rows())
        .map(|row| -> Result<Interval<'a>> {
            Ok(Interval {
                chrom: table.rows()[row][chrom_idx].as_str(),
                start: coordinate(row, start_idx, &cols.start)?,
                end: coordinate(row, end_idx, &cols.end)?,
            })
        })
        .collect()
}

fn index_regions<'a>(regions: &[Interval<'a>]) -> RegionIndex<'a> {
    let mut index: RegionIndex = HashMap::new();
    for region in regions {
        index
            .entry(region.chrom)
            .or_default()
            .push((region.start, region.end));
    }
    index
}

/// Push `variant_idx` once for every region in `regions` that `variant` overlaps.
fn collect_hits(
    variant_idx: usize,
    variant: &Interval,
    regions: &[(i64, i64)],
    hits: &mut Vec<usize>,
) {
    for &(start, end) in regions {
        if utils::ranges_overlap(variant.start, variant.end, start, end) {
            hits.push(variant_idx);
        }
    }
}

/// Join all variants against one index of the whole panel.
fn global_join(variants: &[Interval], panel: &[Interval]) -> Vec<usize> {
    let index = index_regions(panel);
    let mut hits = Vec::new();
    for (i, variant) in variants.iter().enumerate() {
        if let Some(regions) = index.get(variant.chrom) {
            collect_hits(i, variant, regions, &mut hits);
        }
    }
    hits
}

/// Split variants and regions by chromosome, join every chromosome separately
/// and concatenate the results in sorted chromosome order.
fn partitioned_join(variants: &[Interval], panel: &[Interval]) -> Vec<usize> {
    let mut partitions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, variant) in variants.iter().enumerate() {
        partitions.entry(variant.chrom).or_default().push(i);
    }
    let partitions: Vec<(&str, Vec<usize>)> = partitions.into_iter().collect();
    let index = index_regions(panel);

    let per_chromosome: Vec<Vec<usize>> = partitions
        .into_par_iter()
        .map(|(chrom, variant_idxs)| {
            let mut hits = Vec::new();
            let Some(regions) = index.get(chrom) else {
                trace!("No panel regions on {chrom}, dropping {} variants", variant_idxs.len());
                return hits;
            };
            for i in variant_idxs {
                collect_hits(i, &variants[i], regions, &mut hits);
            }
            trace!("{} hits on {chrom}", hits.len());
            hits
        })
        .collect();

    per_chromosome.into_iter().flatten().collect()
}
