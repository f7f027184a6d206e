//! Track projections of the interval table.
//!
//! Five fixed tab-separated layouts over the same rows. Coordinates are
//! 0-based half-open `[start, end)` per the usual genome-browser track
//! conventions. Row order equals input order except for the unstranded
//! merge, which regroups by first-seen coordinate.

use crate::interval::ScoredInterval;
use crate::types::{HashMap, HashMapExt};
use std::io::{self, Write};

/// Feature name emitted for every insertion row.
pub const SITE_NAME: &str = "i";

/// Placeholder score for the plain BED track, where only the strand column
/// carries information.
pub const PLACEHOLDER_BED_SCORE: i64 = 999;

/// Plain BED: `chr, start, end, name, 999, strand`.
pub fn write_bed<W: Write>(intervals: &[ScoredInterval], out: &mut W) -> io::Result<()> {
    for iv in intervals {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            iv.chr_name, iv.start, iv.end, SITE_NAME, PLACEHOLDER_BED_SCORE, iv.strand
        )?;
    }
    Ok(())
}

/// Scored BED: `chr, start, end, name, normalized_score, strand`.
pub fn write_scored_bed<W: Write>(intervals: &[ScoredInterval], out: &mut W) -> io::Result<()> {
    for iv in intervals {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            iv.chr_name, iv.start, iv.end, SITE_NAME, iv.normalized_score, iv.strand
        )?;
    }
    Ok(())
}

/// Stranded bedGraph: `chr, start, end, normalized_score`, one row per
/// strand-split interval.
pub fn write_stranded_bedgraph<W: Write>(
    intervals: &[ScoredInterval],
    out: &mut W,
) -> io::Result<()> {
    for iv in intervals {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            iv.chr_name, iv.start, iv.end, iv.normalized_score
        )?;
    }
    Ok(())
}

/// Unstranded bedGraph: same layout as the stranded variant, but rows that
/// share `(chr, start, end)` are merged by summing `normalized_score`.
/// This is the one projection where strand information is discarded.
/// Groups are emitted in first-seen order.
pub fn write_unstranded_bedgraph<W: Write>(
    intervals: &[ScoredInterval],
    out: &mut W,
) -> io::Result<()> {
    let mut order: Vec<(&ScoredInterval, i64)> = Vec::with_capacity(intervals.len());
    let mut index: HashMap<(&str, i64, i64), usize> = HashMap::with_capacity(intervals.len());
    for iv in intervals {
        match index.get(&(iv.chr_name.as_str(), iv.start, iv.end)).copied() {
            Some(i) => order[i].1 += iv.normalized_score,
            None => {
                index.insert((iv.chr_name.as_str(), iv.start, iv.end), order.len());
                order.push((iv, iv.normalized_score));
            }
        }
    }
    for (iv, merged_score) in order {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            iv.chr_name, iv.start, iv.end, merged_score
        )?;
    }
    Ok(())
}

/// Unnormalized stranded bedGraph: `chr, start, end, raw score`, unmerged.
pub fn write_unnormalized_bedgraph<W: Write>(
    intervals: &[ScoredInterval],
    out: &mut W,
) -> io::Result<()> {
    for iv in intervals {
        writeln!(out, "{}\t{}\t{}\t{}", iv.chr_name, iv.start, iv.end, iv.score)?;
    }
    Ok(())
}
