use tradis_map_rs::{Cigar, CigarOp};

#[test]
fn parse_single_op() {
    let cigar = Cigar::parse("42M").expect("42M parses");
    assert_eq!(cigar.ops, vec![(42, CigarOp::Match)]);
    assert_eq!(cigar.first_op(), Some(CigarOp::Match));
    assert_eq!(cigar.last_op(), Some(CigarOp::Match));
    assert_eq!(cigar.aligned_ref_len(), 42);
}

#[test]
fn parse_multi_op() {
    let cigar = Cigar::parse("72M3S").expect("72M3S parses");
    assert_eq!(cigar.ops, vec![(72, CigarOp::Match), (3, CigarOp::SoftClip)]);
    assert_eq!(cigar.first_op(), Some(CigarOp::Match));
    assert_eq!(cigar.last_op(), Some(CigarOp::SoftClip));
    // Soft clips do not consume reference bases.
    assert_eq!(cigar.aligned_ref_len(), 72);
}

/// Reference span sums M, D, N, = and X only.
#[test]
fn aligned_len_counts_reference_consuming_ops() {
    let cigar = Cigar::parse("10M2D5N3I4=1X2S").expect("parses");
    assert_eq!(cigar.aligned_ref_len(), 10 + 2 + 5 + 4 + 1);
}

#[test]
fn aligned_len_zero_without_reference_ops() {
    let cigar = Cigar::parse("5S3I").expect("parses");
    assert_eq!(cigar.aligned_ref_len(), 0);
}

/// Out-of-grammar strings yield `None` rather than an error: the owning
/// row is dropped and the batch continues.
#[test]
fn malformed_strings_are_rejected() {
    for s in ["", "*", "M", "42", "42m", "4 2M", "42M3", "42B", "-3M"] {
        assert!(Cigar::parse(s).is_none(), "{s:?} should not parse");
    }
}

#[test]
fn zero_length_op_is_within_grammar() {
    let cigar = Cigar::parse("0M").expect("0M parses");
    assert_eq!(cigar.ops, vec![(0, CigarOp::Match)]);
    assert_eq!(cigar.aligned_ref_len(), 0);
}

#[test]
fn overlong_length_is_rejected() {
    // Length overflows u32; the whole string is rejected.
    assert!(Cigar::parse("99999999999M").is_none());
}
