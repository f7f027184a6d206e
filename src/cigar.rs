//! Text CIGAR handling.
//!
//! Input rows carry the CIGAR as plain text (e.g. `"42M3S"`). Parsing is
//! soft-failing: a string that does not match the `(<length><op>)+` grammar
//! yields `None`, and the owning row is dropped by the caller rather than
//! aborting the batch.

/// One SAM CIGAR operation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarOp {
    Match,
    Ins,
    Del,
    RefSkip,
    SoftClip,
    HardClip,
    Pad,
    Equal,
    Diff,
}

impl CigarOp {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(CigarOp::Match),
            'I' => Some(CigarOp::Ins),
            'D' => Some(CigarOp::Del),
            'N' => Some(CigarOp::RefSkip),
            'S' => Some(CigarOp::SoftClip),
            'H' => Some(CigarOp::HardClip),
            'P' => Some(CigarOp::Pad),
            '=' => Some(CigarOp::Equal),
            'X' => Some(CigarOp::Diff),
            _ => None,
        }
    }

    /// True for operations that advance the reference coordinate
    /// (M, D, N, =, X).
    pub fn consumes_reference(self) -> bool {
        matches!(
            self,
            CigarOp::Match | CigarOp::Del | CigarOp::RefSkip | CigarOp::Equal | CigarOp::Diff
        )
    }
}

/// An ordered run-length CIGAR decomposition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cigar {
    pub ops: Vec<(u32, CigarOp)>,
}

impl Cigar {
    /// Parse a text CIGAR. The whole string must consist of
    /// `<positive integer><op letter>` tokens; anything else (empty string,
    /// `"*"`, a missing length, a letter outside the SAM alphabet) returns
    /// `None`.
    pub fn parse(s: &str) -> Option<Cigar> {
        if s.is_empty() {
            return None;
        }
        let mut ops = Vec::new();
        let mut len: u32 = 0;
        let mut have_digits = false;
        for c in s.chars() {
            if let Some(d) = c.to_digit(10) {
                len = len.checked_mul(10)?.checked_add(d)?;
                have_digits = true;
            } else {
                let op = CigarOp::from_char(c)?;
                if !have_digits {
                    return None;
                }
                ops.push((len, op));
                len = 0;
                have_digits = false;
            }
        }
        // Trailing digits with no operation letter.
        if have_digits {
            return None;
        }
        Some(Cigar { ops })
    }

    pub fn first_op(&self) -> Option<CigarOp> {
        self.ops.first().map(|&(_, op)| op)
    }

    pub fn last_op(&self) -> Option<CigarOp> {
        self.ops.last().map(|&(_, op)| op)
    }

    /// Total reference span: the sum of lengths of reference-consuming
    /// operations, 0 when none is present.
    pub fn aligned_ref_len(&self) -> i64 {
        self.ops
            .iter()
            .filter(|(_, op)| op.consumes_reference())
            .map(|&(len, _)| i64::from(len))
            .sum()
    }
}
