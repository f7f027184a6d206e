use std::fmt;

// Fast hash maps using AHash instead of the default SipHash.
// Import these throughout the codebase with `use crate::types::HashMap`.
// Also import `HashMapExt` when you need `::new()` or `::with_capacity()`.
pub(crate) type HashMap<K, V> = ahash::HashMap<K, V>;
pub(crate) use ahash::HashMapExt;

/// Read orientation, derived from the SAM flag field at the parse boundary.
///
/// Only unpaired forward (flag 0) and unpaired reverse (flag 16) records
/// enter the pipeline; every other flag value is dropped before this type
/// is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Strand::Forward),
            16 => Some(Strand::Reverse),
            _ => None,
        }
    }

    /// Strand text as used by BED-family tables ("+" / "-").
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
