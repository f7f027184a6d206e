//! Per-coordinate aggregation of called insertion sites.

use crate::record::AlignmentRecord;
use crate::types::{HashMap, HashMapExt, Strand};

/// One distinct insertion coordinate with per-strand read counts.
#[derive(Debug, Clone)]
pub struct InsertionSite {
    pub chr_name: String,
    pub start: i64,
    /// `start + 1`; sites are single-base.
    pub end: i64,
    pub score_pos: u64,
    pub score_neg: u64,
    pub score_total: u64,
}

/// Group called records into one site per distinct coordinate.
///
/// Sites are keyed by `start` alone; `chr_name` is taken from the first
/// record observed at that coordinate. The result is sorted by
/// (`chr_name`, `start`), chromosome name lexicographic, start numeric.
pub fn aggregate_sites(records: &[AlignmentRecord]) -> Vec<InsertionSite> {
    let mut by_start: HashMap<i64, InsertionSite> = HashMap::with_capacity(records.len());
    for rec in records {
        let site = by_start.entry(rec.start).or_insert_with(|| InsertionSite {
            chr_name: rec.chr_name.clone(),
            start: rec.start,
            end: rec.start + 1,
            score_pos: 0,
            score_neg: 0,
            score_total: 0,
        });
        match rec.strand {
            Strand::Forward => site.score_pos += 1,
            Strand::Reverse => site.score_neg += 1,
        }
        site.score_total += 1;
    }

    let mut sites: Vec<InsertionSite> = by_start.into_values().collect();
    sites.sort_by(|a, b| a.chr_name.cmp(&b.chr_name).then(a.start.cmp(&b.start)));
    sites
}
