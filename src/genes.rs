//! Gene-insertion attribution.
//!
//! Consumes a gene interval table plus the pre-joined gene/insertion pairs
//! produced by an external interval-intersection tool, keeps pairs whose
//! insertion falls inside a strand-aware window of the gene body, and
//! aggregates read counts and insertion counts per gene.

use crate::error::{Error, Result};
use crate::types::{HashMap, HashMapExt, Strand};
use std::io::{self, Write};

/// Accepted insertion window relative to the gene body, as percentages of
/// gene length measured from the translational start. Insertions within the
/// first 5% or past 85% of the gene are not counted as disruptive.
pub const LENGTH_PC_START: f64 = 5.0;
pub const LENGTH_PC_STOP: f64 = 85.0;

/// Coordinate jitter tolerated from the upstream interval join.
const JOIN_JITTER: i64 = 5;

/// One gene interval with its insertion accumulators.
#[derive(Debug, Clone)]
pub struct GeneRecord {
    pub chr_name: String,
    pub start: i64,
    pub end: i64,
    /// Locus tag; unique across the table, used as the aggregation key.
    pub name: String,
    pub score: i64,
    /// Strand column as read from the input, kept for output.
    pub strand_text: String,
    /// Normalized strand; `None` when the input text is neither "+" nor "-".
    pub strand: Option<Strand>,
    pub read_count: i64,
    pub ins_count: i64,
    pub ins_index: f64,
}

impl GeneRecord {
    pub fn gene_length(&self) -> i64 {
        self.end - self.start
    }
}

/// One pre-joined gene/insertion overlap row. Only the fields consumed by
/// the window filter and the accumulators are retained.
#[derive(Debug, Clone)]
pub struct GeneInsertionPair {
    pub gene_name: String,
    pub gene_start: i64,
    pub gene_end: i64,
    pub gene_strand: Option<Strand>,
    pub insertion_start: i64,
    pub insertion_score: i64,
}

fn parse_int(field: &str, column: &str, table: &str, lineno: usize) -> Result<i64> {
    field.trim().parse::<i64>().map_err(|_| {
        Error::InputFormat(format!(
            "{table} line {lineno}: column '{column}' is not an integer: {field:?}"
        ))
    })
}

/// Parse one gene-table row: `chr_name, start, end, name, score, strand`.
/// These tables are machine-produced, so a short or mistyped row is fatal.
pub fn parse_gene_line(line: &str, lineno: usize) -> Result<GeneRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 6 {
        return Err(Error::InputFormat(format!(
            "gene table line {lineno}: expected 6 columns, found {}",
            fields.len()
        )));
    }
    Ok(GeneRecord {
        chr_name: fields[0].to_string(),
        start: parse_int(fields[1], "start", "gene table", lineno)?,
        end: parse_int(fields[2], "end", "gene table", lineno)?,
        name: fields[3].to_string(),
        score: parse_int(fields[4], "score", "gene table", lineno)?,
        strand_text: fields[5].to_string(),
        strand: Strand::from_symbol(fields[5]),
        read_count: 0,
        ins_count: 0,
        ins_index: 0.0,
    })
}

/// Parse one join-table row. Ten columns are consumed
/// (gene sextet, then insertion `chr, start, end, score`); extras ignored.
pub fn parse_pair_line(line: &str, lineno: usize) -> Result<GeneInsertionPair> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 10 {
        return Err(Error::InputFormat(format!(
            "intersect table line {lineno}: expected 10 columns, found {}",
            fields.len()
        )));
    }
    // Gene and insertion chromosome names plus the gene score and insertion
    // end are present but unused by the filter and accumulators.
    parse_int(fields[4], "score_gene", "intersect table", lineno)?;
    parse_int(fields[8], "end_insertion", "intersect table", lineno)?;
    Ok(GeneInsertionPair {
        gene_name: fields[3].to_string(),
        gene_start: parse_int(fields[1], "start_gene", "intersect table", lineno)?,
        gene_end: parse_int(fields[2], "end_gene", "intersect table", lineno)?,
        gene_strand: Strand::from_symbol(fields[5]),
        insertion_start: parse_int(fields[7], "start_insertion", "intersect table", lineno)?,
        insertion_score: parse_int(fields[9], "score_insertion", "intersect table", lineno)?,
    })
}

/// Window predicate: does this pair's insertion fall inside the accepted
/// region of the gene body?
///
/// The window runs from `LENGTH_PC_START`% to `LENGTH_PC_STOP`% of gene
/// length measured from the start codon, so it mirrors between strands.
/// ±`JOIN_JITTER` absorbs off-by-a-few coordinates from the upstream join.
pub fn in_gene_window(pair: &GeneInsertionPair) -> bool {
    let gene_len = (pair.gene_end - pair.gene_start) as f64;
    let lo = (pair.insertion_start - JOIN_JITTER) as f64;
    let hi = (pair.insertion_start + JOIN_JITTER) as f64;
    let gene_start = pair.gene_start as f64;
    let gene_last = (pair.gene_end - 1) as f64;
    match pair.gene_strand {
        Some(Strand::Forward) => {
            lo >= gene_start + gene_len * LENGTH_PC_START / 100.0
                && hi <= gene_last - gene_len * (100.0 - LENGTH_PC_STOP) / 100.0
        }
        Some(Strand::Reverse) => {
            hi <= gene_last - gene_len * LENGTH_PC_START / 100.0
                && lo >= gene_start + gene_len * (100.0 - LENGTH_PC_STOP) / 100.0
        }
        None => false,
    }
}

/// Fold surviving pairs into the gene table and compute every gene's
/// insertion index. Genes with no surviving pair keep zero counts and an
/// index of 0. Returns the number of surviving pairs.
pub fn attribute_insertions(genes: &mut [GeneRecord], pairs: &[GeneInsertionPair]) -> usize {
    let mut by_name: HashMap<String, usize> = HashMap::with_capacity(genes.len());
    for (idx, gene) in genes.iter().enumerate() {
        by_name.insert(gene.name.clone(), idx);
    }

    let mut surviving = 0usize;
    for pair in pairs.iter().filter(|p| in_gene_window(p)) {
        surviving += 1;
        match by_name.get(pair.gene_name.as_str()) {
            Some(&idx) => {
                // Indexing through the map is the only mutation of the gene
                // table in the whole stage.
                let gene = &mut genes[idx];
                gene.read_count += pair.insertion_score;
                gene.ins_count += 1;
            }
            None => {
                tracing::warn!(gene = %pair.gene_name, "join row names a gene absent from the gene table");
            }
        }
    }

    for gene in genes.iter_mut() {
        let len = gene.gene_length();
        gene.ins_index = if len > 0 {
            gene.ins_count as f64 / len as f64
        } else {
            0.0
        };
    }
    surviving
}

/// Write the per-gene statistics table, header included, one row per gene
/// in original input order.
pub fn write_gene_table<W: Write>(genes: &[GeneRecord], out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "chr_name\tlocus_tag\tgene_name\tncrna\tstart\tend\tstrand\tread_count\tins_index\tgene_length\tins_count\tfcn"
    )?;
    for gene in genes {
        writeln!(
            out,
            "{}\t{}\t{}\t0\t{}\t{}\t{}\t{}\t{}\t{}\t{}\tNA",
            gene.chr_name,
            gene.name,
            gene.name,
            gene.start,
            gene.end,
            gene.strand_text,
            gene.read_count,
            gene.ins_index,
            gene.gene_length(),
            gene.ins_count,
        )?;
    }
    Ok(())
}
