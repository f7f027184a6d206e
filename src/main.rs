use anyhow::Result;
use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

use tradis_map_rs::cli::{Args, Command};
use tradis_map_rs::pipeline;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &args.command {
        Command::Sites(sites) => {
            let stats = pipeline::run_sites(sites)?;
            tracing::info!(
                total_lines = stats.total_lines,
                dropped = stats.dropped(),
                valid_reads = stats.valid_reads,
                sites = stats.sites,
                intervals = stats.intervals,
                "sites: processing complete"
            );
        }
        Command::Genes(genes) => {
            let stats = pipeline::run_genes(genes)?;
            tracing::info!(
                genes = stats.genes,
                pairs = stats.pairs,
                surviving_pairs = stats.surviving_pairs,
                "genes: processing complete"
            );
        }
    }
    Ok(())
}
