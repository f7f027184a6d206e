//! Error types for the tradis-map library.

use thiserror::Error;

/// Errors that terminate a run.
///
/// Row-level damage (a malformed CIGAR, an unexpected flag value, a
/// truncated line) is not represented here: those rows are dropped and
/// counted by the caller, and the batch continues.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A required column is absent or an integer-typed column failed to parse.
    #[error("{0}")]
    InputFormat(String),

    /// A stage produced no rows where downstream processing needs at least one.
    #[error("{0}")]
    EmptyResult(String),

    /// An invalid run configuration was detected before processing started.
    #[error("{0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
