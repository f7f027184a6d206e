//! tradis-map-rs: map transposon-insertion sites from aligned reads and
//! attribute them to genes.
//!
//! # Library usage
//!
//! ```no_run
//! use tradis_map_rs::record::{parse_line, LineOutcome};
//! use tradis_map_rs::site::aggregate_sites;
//! use tradis_map_rs::interval::normalize_intervals;
//! use tradis_map_rs::tracks;
//!
//! // Parse alignment rows (tab-separated SAM projection), call sites and
//! // normalize:
//! // let records = /* parse_line over input lines, keeping LineOutcome::Called */;
//! // let sites = aggregate_sites(&records);
//! // let intervals = normalize_intervals(&sites, 1_000_000, 1.0)?;
//! // tracks::write_scored_bed(&intervals, &mut out)?;
//! ```

pub mod cigar;
pub mod cli;
pub mod error;
pub mod genes;
pub mod interval;
pub mod pipeline;
pub mod record;
pub mod site;
pub mod tracks;
pub(crate) mod types;

// Flat re-exports for the most commonly used types.
pub use cigar::{Cigar, CigarOp};
pub use error::Error;
pub use genes::{GeneInsertionPair, GeneRecord};
pub use interval::ScoredInterval;
pub use record::AlignmentRecord;
pub use site::InsertionSite;
pub use types::Strand;
