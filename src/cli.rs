use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tradis-map-rs",
    about = "Map transposon-insertion sites from aligned reads and attribute them to genes",
    version
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Set logging level to WARN
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Call insertion sites from aligned reads and emit genome-browser tracks
    Sites(SitesArgs),

    /// Attribute insertion intervals to genes and compute insertion indices
    Genes(GenesArgs),
}

#[derive(ClapArgs, Debug)]
pub struct SitesArgs {
    /// Tab-separated alignment records (name, flag, chr, pos, score, cigar);
    /// '-' reads from stdin
    pub input: PathBuf,

    /// Target sum of normalized scores across emitted intervals
    pub normalization_value: i64,

    /// Directory receiving the track files
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Minimum aligned reference length of a read (strict)
    #[arg(long = "read-len-threshold", value_name = "INT", default_value_t = 30)]
    pub read_len_threshold: i64,

    /// Minimum per-strand read count at a site (strict)
    #[arg(long = "score-threshold", value_name = "FLOAT", default_value_t = 1.0)]
    pub score_threshold: f64,

    /// Emit the plain BED track
    #[arg(long = "bed", value_name = "BOOL", default_value_t = true, action = clap::ArgAction::Set)]
    pub bed: bool,

    /// Emit the scored BED track
    #[arg(long = "scored-bed", value_name = "BOOL", default_value_t = true, action = clap::ArgAction::Set)]
    pub scored_bed: bool,

    /// Emit the stranded bedGraph track
    #[arg(long = "stranded-bedgraph", value_name = "BOOL", default_value_t = true, action = clap::ArgAction::Set)]
    pub stranded_bedgraph: bool,

    /// Emit the unstranded (strand-merged) bedGraph track
    #[arg(long = "unstranded-bedgraph", value_name = "BOOL", default_value_t = true, action = clap::ArgAction::Set)]
    pub unstranded_bedgraph: bool,

    /// Emit the unnormalized stranded bedGraph track
    #[arg(long = "unnormalized-bedgraph", value_name = "BOOL", default_value_t = true, action = clap::ArgAction::Set)]
    pub unnormalized_bedgraph: bool,
}

#[derive(ClapArgs, Debug)]
pub struct GenesArgs {
    /// Gene intervals (BED6: chr, start, end, name, score, strand)
    pub genes: PathBuf,

    /// Pre-joined gene/insertion overlaps (10 columns, from an interval
    /// intersection of the gene table against the scored-BED track)
    pub intersect: PathBuf,

    /// Output path for the per-gene statistics table
    pub output: PathBuf,
}
