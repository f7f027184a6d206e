use tradis_map_rs::interval::normalize_intervals;
use tradis_map_rs::record::{parse_line, AlignmentRecord, LineOutcome};
use tradis_map_rs::site::aggregate_sites;
use tradis_map_rs::tracks;
use tradis_map_rs::{Cigar, Error, ScoredInterval, Strand};

// ── helpers ──────────────────────────────────────────────────────────────────

fn called(line: &str, threshold: i64) -> AlignmentRecord {
    match parse_line(line, 1, threshold).expect("no fatal error") {
        LineOutcome::Called(rec) => rec,
        other => panic!("expected a called site, got {other:?}"),
    }
}

fn record_at(strand: Strand, start: i64) -> AlignmentRecord {
    AlignmentRecord {
        name: "read".to_string(),
        chr_name: "chr".to_string(),
        pos: 0,
        strand,
        cigar: Cigar::parse("42M").unwrap(),
        aligned_len: 42,
        start,
    }
}

fn interval_at(start: i64, strand: Strand, normalized_score: i64) -> ScoredInterval {
    ScoredInterval {
        chr_name: "chr".to_string(),
        start,
        end: start + 1,
        strand,
        score: normalized_score as u64,
        normalized_score,
    }
}

// ── validation and site calling ──────────────────────────────────────────────

/// The documented end-to-end example: one forward read, 42M, threshold 30.
#[test]
fn forward_read_calls_site_at_pos_plus_3() {
    let rec = called("read1\t0\tchrX\t100\t60\t42M", 30);
    assert_eq!(rec.strand, Strand::Forward);
    assert_eq!(rec.aligned_len, 42);
    assert_eq!(rec.start, 103);
    assert_eq!(rec.chr_name, "chrX");
}

/// pos=100, reverse, aligned length 50 ⇒ start = 100 + 50 - 6 = 144.
#[test]
fn reverse_read_calls_site_from_alignment_end() {
    let rec = called("read1\t16\tchrX\t100\t60\t50M", 30);
    assert_eq!(rec.strand, Strand::Reverse);
    assert_eq!(rec.start, 144);
}

#[test]
fn forward_read_requires_leading_match() {
    // Leading soft clip on a forward read: orientation check fails.
    let out = parse_line("r\t0\tchrX\t100\t60\t3S39M", 1, 30).unwrap();
    assert!(matches!(out, LineOutcome::Invalid));
    // The same shape is fine on a reverse read (trailing op is M).
    let rec = called("r\t16\tchrX\t100\t60\t3S39M", 30);
    assert_eq!(rec.start, 100 + 39 - 6);
}

#[test]
fn aligned_length_threshold_is_strict() {
    let out = parse_line("r\t0\tchrX\t100\t60\t30M", 1, 30).unwrap();
    assert!(matches!(out, LineOutcome::Invalid), "30 <= 30 must fail");
    let rec = called("r\t0\tchrX\t100\t60\t31M", 30);
    assert_eq!(rec.aligned_len, 31);
}

#[test]
fn foreign_flags_and_bad_rows_are_dropped_not_fatal() {
    for (line, want) in [
        ("r\t4\tchrX\t100\t60\t42M", "Unstranded"),
        ("r\t256\tchrX\t100\t60\t42M", "Unstranded"),
        ("r\t0\tchrX\t100\t60\t*", "BadCigar"),
        ("r\t0\tchrX\t100", "Truncated"),
    ] {
        let out = parse_line(line, 1, 30).unwrap();
        assert_eq!(format!("{out:?}"), want, "line {line:?}");
    }
}

/// Non-numeric text in an integer-typed column aborts the run.
#[test]
fn non_numeric_integer_column_is_fatal() {
    let err = parse_line("r\t0\tchrX\tabc\t60\t42M", 7, 30).unwrap_err();
    match err {
        Error::InputFormat(msg) => assert!(msg.contains("line 7"), "{msg}"),
        other => panic!("expected InputFormat, got {other:?}"),
    }
}

// ── aggregation ──────────────────────────────────────────────────────────────

/// [(+,10), (+,10), (-,10)] ⇒ one site with score_pos=2, score_neg=1, total=3.
#[test]
fn aggregate_counts_by_strand() {
    let records = vec![
        record_at(Strand::Forward, 10),
        record_at(Strand::Forward, 10),
        record_at(Strand::Reverse, 10),
    ];
    let sites = aggregate_sites(&records);
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].start, 10);
    assert_eq!(sites[0].end, 11);
    assert_eq!(sites[0].score_pos, 2);
    assert_eq!(sites[0].score_neg, 1);
    assert_eq!(sites[0].score_total, 3);
}

#[test]
fn sites_sorted_by_chromosome_then_start() {
    let mut a = record_at(Strand::Forward, 500);
    a.chr_name = "chrB".to_string();
    let mut b = record_at(Strand::Forward, 10);
    b.chr_name = "chrB".to_string();
    let mut c = record_at(Strand::Forward, 900);
    c.chr_name = "chrA".to_string();
    let sites = aggregate_sites(&[a, b, c]);
    let order: Vec<(&str, i64)> = sites.iter().map(|s| (s.chr_name.as_str(), s.start)).collect();
    assert_eq!(order, vec![("chrA", 900), ("chrB", 10), ("chrB", 500)]);
}

// ── normalization ────────────────────────────────────────────────────────────

fn sites_with_counts(counts: &[(i64, u64, u64)]) -> Vec<tradis_map_rs::InsertionSite> {
    let mut records = Vec::new();
    for &(start, pos, neg) in counts {
        for _ in 0..pos {
            records.push(record_at(Strand::Forward, start));
        }
        for _ in 0..neg {
            records.push(record_at(Strand::Reverse, start));
        }
    }
    aggregate_sites(&records)
}

#[test]
fn score_threshold_is_strict() {
    let sites = sites_with_counts(&[(10, 2, 0), (20, 1, 0), (30, 0, 3)]);
    let intervals = normalize_intervals(&sites, 1000, 1.0).unwrap();
    // The count-1 site at 20 is dropped; the others survive.
    let starts: Vec<(i64, Strand)> = intervals.iter().map(|iv| (iv.start, iv.strand)).collect();
    assert_eq!(starts, vec![(10, Strand::Forward), (30, Strand::Reverse)]);
}

/// Σ normalized_score lands within rounding distance of the target: each
/// term is floor-truncated then floored at 1, so deviation is bounded by
/// the interval count.
#[test]
fn normalized_scores_sum_near_target() {
    let sites = sites_with_counts(&[(10, 40, 0), (20, 2, 0), (30, 0, 7), (40, 13, 2)]);
    let target = 10_000;
    let intervals = normalize_intervals(&sites, target, 1.0).unwrap();
    let sum: i64 = intervals.iter().map(|iv| iv.normalized_score).sum();
    let n = intervals.len() as i64;
    assert!(
        (sum - target).abs() <= n,
        "sum {sum} deviates from {target} by more than {n}"
    );
    assert!(intervals.iter().all(|iv| iv.normalized_score >= 1));
}

#[test]
fn co_located_strands_split_into_two_intervals() {
    let sites = sites_with_counts(&[(47, 2, 2)]);
    let intervals = normalize_intervals(&sites, 100, 1.0).unwrap();
    assert_eq!(intervals.len(), 2);
    // '+' precedes '-' at the same coordinate.
    assert_eq!(intervals[0].strand, Strand::Forward);
    assert_eq!(intervals[1].strand, Strand::Reverse);
    assert_eq!(intervals[0].normalized_score, 50);
    assert_eq!(intervals[1].normalized_score, 50);
}

#[test]
fn empty_survivor_set_is_a_defined_failure() {
    // Every site is at or below the threshold: the normalization
    // denominator would be zero.
    let sites = sites_with_counts(&[(10, 1, 0), (20, 0, 1)]);
    match normalize_intervals(&sites, 1000, 1.0) {
        Err(Error::EmptyResult(_)) => {}
        other => panic!("expected EmptyResult, got {other:?}"),
    }
}

// ── track projections ────────────────────────────────────────────────────────

#[test]
fn plain_bed_uses_placeholder_score() {
    let intervals = vec![interval_at(26, Strand::Forward, 600)];
    let mut out = Vec::new();
    tracks::write_bed(&intervals, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "chr\t26\t27\ti\t999\t+\n");
}

#[test]
fn scored_bed_uses_normalized_score() {
    let intervals = vec![interval_at(26, Strand::Reverse, 600)];
    let mut out = Vec::new();
    tracks::write_scored_bed(&intervals, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "chr\t26\t27\ti\t600\t-\n");
}

/// The documented merge example: 54 + 54 at the same coordinate ⇒ 108.
#[test]
fn unstranded_merge_sums_same_coordinate_strands() {
    let intervals = vec![
        interval_at(26, Strand::Forward, 2189),
        interval_at(47, Strand::Forward, 54),
        interval_at(47, Strand::Reverse, 54),
        interval_at(68, Strand::Forward, 54),
    ];
    let mut out = Vec::new();
    tracks::write_unstranded_bedgraph(&intervals, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "chr\t26\t27\t2189\nchr\t47\t48\t108\nchr\t68\t69\t54\n"
    );
}

#[test]
fn stranded_bedgraph_keeps_both_rows() {
    let intervals = vec![
        interval_at(47, Strand::Forward, 54),
        interval_at(47, Strand::Reverse, 54),
    ];
    let mut out = Vec::new();
    tracks::write_stranded_bedgraph(&intervals, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "chr\t47\t48\t54\nchr\t47\t48\t54\n");
}

#[test]
fn unnormalized_bedgraph_uses_raw_counts() {
    let mut iv = interval_at(26, Strand::Forward, 600);
    iv.score = 3;
    let mut out = Vec::new();
    tracks::write_unnormalized_bedgraph(&[iv], &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "chr\t26\t27\t3\n");
}

/// Identical input and parameters render byte-identical output.
#[test]
fn rendering_is_deterministic() {
    let sites = sites_with_counts(&[(10, 40, 3), (20, 2, 0), (30, 0, 7), (40, 13, 2)]);
    let render = || {
        let intervals = normalize_intervals(&sites, 5000, 1.0).unwrap();
        let mut out = Vec::new();
        tracks::write_scored_bed(&intervals, &mut out).unwrap();
        tracks::write_unstranded_bedgraph(&intervals, &mut out).unwrap();
        out
    };
    assert_eq!(render(), render());
}
