use crate::cli::{GenesArgs, SitesArgs};
use crate::error::{Error, Result};
use crate::genes::{self, GeneInsertionPair, GeneRecord};
use crate::interval::{self, ScoredInterval};
use crate::record::{self, AlignmentRecord, LineOutcome};
use crate::site;
use crate::tracks;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Output basename used when the alignment input arrives on stdin.
const STDIN_BASENAME: &str = "cigar_out";

#[derive(Debug, Default)]
pub struct SiteStats {
    pub total_lines: u64,
    pub truncated: u64,
    pub unstranded: u64,
    pub bad_cigar: u64,
    pub invalid: u64,
    pub valid_reads: u64,
    pub sites: u64,
    pub intervals: u64,
}

impl SiteStats {
    pub fn dropped(&self) -> u64 {
        self.truncated + self.unstranded + self.bad_cigar + self.invalid
    }
}

#[derive(Debug, Default)]
pub struct GeneStats {
    pub genes: u64,
    pub pairs: u64,
    pub surviving_pairs: u64,
}

/// Stage (a): alignment rows in, track files out.
pub fn run_sites(args: &SitesArgs) -> Result<SiteStats> {
    if args.normalization_value <= 0 {
        return Err(Error::Configuration(format!(
            "normalization value must be positive, got {}",
            args.normalization_value
        )));
    }
    if !args.output_dir.is_dir() {
        return Err(Error::Configuration(format!(
            "output directory does not exist: {}",
            args.output_dir.display()
        )));
    }

    let (reader, basename) = open_alignment_input(&args.input)?;
    let (records, mut stats) = collect_records(reader, args.read_len_threshold)?;
    if records.is_empty() {
        return Err(Error::EmptyResult(format!(
            "no alignment records passed validity filtering ({} lines read)",
            stats.total_lines
        )));
    }

    let sites = site::aggregate_sites(&records);
    let intervals =
        interval::normalize_intervals(&sites, args.normalization_value, args.score_threshold)?;
    stats.sites = sites.len() as u64;
    stats.intervals = intervals.len() as u64;

    write_tracks(args, &basename, &intervals)?;
    Ok(stats)
}

fn open_alignment_input(input: &Path) -> Result<(Box<dyn BufRead>, String)> {
    if input.as_os_str() == "-" {
        return Ok((Box::new(BufReader::new(io::stdin())), STDIN_BASENAME.to_string()));
    }
    let file = File::open(input).map_err(|e| {
        Error::InputFormat(format!("cannot open alignment input {}: {e}", input.display()))
    })?;
    let basename = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| STDIN_BASENAME.to_string());
    Ok((Box::new(BufReader::new(file)), basename))
}

fn collect_records(
    reader: Box<dyn BufRead>,
    read_len_threshold: i64,
) -> Result<(Vec<AlignmentRecord>, SiteStats)> {
    let mut stats = SiteStats::default();
    let mut records: Vec<AlignmentRecord> = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        stats.total_lines += 1;
        match record::parse_line(&line, idx + 1, read_len_threshold)? {
            LineOutcome::Called(rec) => records.push(rec),
            LineOutcome::Truncated => stats.truncated += 1,
            LineOutcome::Unstranded => stats.unstranded += 1,
            LineOutcome::BadCigar => stats.bad_cigar += 1,
            LineOutcome::Invalid => stats.invalid += 1,
        }
    }
    stats.valid_reads = records.len() as u64;
    tracing::debug!(
        total = stats.total_lines,
        truncated = stats.truncated,
        unstranded = stats.unstranded,
        bad_cigar = stats.bad_cigar,
        invalid = stats.invalid,
        "alignment rows classified"
    );
    Ok((records, stats))
}

/// Render every requested track in memory, stage each into a temp file in
/// the output directory, then persist them all. A failure anywhere before
/// the persist loop leaves no track file behind.
fn write_tracks(args: &SitesArgs, basename: &str, intervals: &[ScoredInterval]) -> Result<()> {
    type Render = fn(&[ScoredInterval], &mut Vec<u8>) -> io::Result<()>;
    let requested: [(bool, String, Render); 5] = [
        (args.bed, format!("{basename}.bed"), tracks::write_bed),
        (args.scored_bed, format!("{basename}_scored.bed"), tracks::write_scored_bed),
        (
            args.stranded_bedgraph,
            format!("{basename}_stranded.bg"),
            tracks::write_stranded_bedgraph,
        ),
        (
            args.unstranded_bedgraph,
            format!("{basename}_unstranded.bg"),
            tracks::write_unstranded_bedgraph,
        ),
        (
            args.unnormalized_bedgraph,
            format!("{basename}_stranded_unnormalized.bg"),
            tracks::write_unnormalized_bedgraph,
        ),
    ];

    let mut staged: Vec<(NamedTempFile, PathBuf)> = Vec::new();
    for (enabled, filename, render) in requested {
        if !enabled {
            continue;
        }
        let mut buf = Vec::new();
        render(intervals, &mut buf)?;
        let mut tmp = NamedTempFile::new_in(&args.output_dir)?;
        tmp.write_all(&buf)?;
        staged.push((tmp, args.output_dir.join(filename)));
    }
    for (tmp, path) in staged {
        tmp.persist(&path).map_err(|e| Error::Io(e.error))?;
        tracing::info!(path = %path.display(), "track written");
    }
    Ok(())
}

/// Stage (b): gene table plus pre-joined overlaps in, per-gene statistics out.
pub fn run_genes(args: &GenesArgs) -> Result<GeneStats> {
    let mut genes = read_gene_table(&args.genes)?;
    let pairs = read_pair_table(&args.intersect)?;

    let mut stats = GeneStats {
        genes: genes.len() as u64,
        pairs: pairs.len() as u64,
        surviving_pairs: 0,
    };
    stats.surviving_pairs = genes::attribute_insertions(&mut genes, &pairs) as u64;

    let mut buf = Vec::new();
    genes::write_gene_table(&genes, &mut buf)?;
    let dir = match args.output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&buf)?;
    tmp.persist(&args.output).map_err(|e| Error::Io(e.error))?;
    tracing::info!(path = %args.output.display(), "gene statistics written");
    Ok(stats)
}

fn read_gene_table(path: &Path) -> Result<Vec<GeneRecord>> {
    let reader = open_table(path, "gene table")?;
    let mut genes = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        genes.push(genes::parse_gene_line(&line, idx + 1)?);
    }
    Ok(genes)
}

fn read_pair_table(path: &Path) -> Result<Vec<GeneInsertionPair>> {
    let reader = open_table(path, "intersect table")?;
    let mut pairs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        pairs.push(genes::parse_pair_line(&line, idx + 1)?);
    }
    Ok(pairs)
}

fn open_table(path: &Path, table: &str) -> Result<BufReader<File>> {
    let file = File::open(path)
        .map_err(|e| Error::InputFormat(format!("cannot open {table} {}: {e}", path.display())))?;
    Ok(BufReader::new(file))
}
