//! Alignment-record parsing, validation and insertion-site calling.
//!
//! Input is the tabular projection of a SAM file: six tab-separated columns
//! `name, flag, chr_name, pos, score, cigar`, no header, extra trailing
//! columns ignored.

use crate::cigar::{Cigar, CigarOp};
use crate::error::{Error, Result};
use crate::types::Strand;

/// Offset from the alignment start to the called insertion point on the
/// forward strand. Encodes the fixed transposon-end geometry of the library
/// preparation; a reverse-strand read lands at
/// `pos + aligned_ref_len + REVERSE_SITE_OFFSET`.
pub const FORWARD_SITE_OFFSET: i64 = 3;
pub const REVERSE_SITE_OFFSET: i64 = -6;

/// One validated alignment with its called insertion coordinate.
#[derive(Debug, Clone)]
pub struct AlignmentRecord {
    pub name: String,
    pub chr_name: String,
    /// 1-based leftmost reference position from the input row.
    pub pos: i64,
    pub strand: Strand,
    pub cigar: Cigar,
    pub aligned_len: i64,
    /// Called insertion coordinate.
    pub start: i64,
}

/// What became of one input line.
#[derive(Debug)]
pub enum LineOutcome {
    /// Passed every filter; the insertion site has been called.
    Called(AlignmentRecord),
    /// Fewer than six tab-separated columns.
    Truncated,
    /// Flag other than 0 (unpaired forward) or 16 (unpaired reverse).
    Unstranded,
    /// CIGAR text did not match the token grammar.
    BadCigar,
    /// Orientation or aligned-length check failed.
    Invalid,
}

fn parse_int(field: &str, column: &str, lineno: usize) -> Result<i64> {
    field.trim().parse::<i64>().map_err(|_| {
        Error::InputFormat(format!(
            "line {lineno}: column '{column}' is not an integer: {field:?}"
        ))
    })
}

/// Parse and classify one alignment line.
///
/// Row-level damage (short line, foreign flag, unparseable CIGAR) is
/// reported through [`LineOutcome`] so the batch continues; a non-numeric
/// value in an integer-typed column is a fatal [`Error::InputFormat`].
pub fn parse_line(line: &str, lineno: usize, read_len_threshold: i64) -> Result<LineOutcome> {
    let mut fields = line.split('\t');
    let (Some(name), Some(flag), Some(chr_name), Some(pos), Some(score), Some(cigar)) = (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) else {
        return Ok(LineOutcome::Truncated);
    };

    let flag = parse_int(flag, "flag", lineno)?;
    let pos = parse_int(pos, "pos", lineno)?;
    // The alignment score is carried but unused beyond type checking.
    let _score = parse_int(score, "score", lineno)?;

    let Some(strand) = Strand::from_flag(flag) else {
        return Ok(LineOutcome::Unstranded);
    };
    let Some(cigar) = Cigar::parse(cigar) else {
        return Ok(LineOutcome::BadCigar);
    };

    let aligned_len = cigar.aligned_ref_len();
    let terminal_match = match strand {
        Strand::Forward => cigar.first_op() == Some(CigarOp::Match),
        Strand::Reverse => cigar.last_op() == Some(CigarOp::Match),
    };
    if !terminal_match || aligned_len <= read_len_threshold {
        return Ok(LineOutcome::Invalid);
    }

    let start = match strand {
        Strand::Forward => pos + FORWARD_SITE_OFFSET,
        Strand::Reverse => pos + aligned_len + REVERSE_SITE_OFFSET,
    };

    Ok(LineOutcome::Called(AlignmentRecord {
        name: name.to_string(),
        chr_name: chr_name.to_string(),
        pos,
        strand,
        cigar,
        aligned_len,
        start,
    }))
}
