use mrc_toolkit::analyzer::{analyze, analyze_brute_force};
use mrc_toolkit::histogram::Distance;
use mrc_toolkit::mrc::{build, build_exact, MissRatioCurve};
use mrc_toolkit::sampling::{SampledHistogram, ShardsMetadata};
use mrc_toolkit::trace::AccessTrace;
use mrc_toolkit::utils::error::MrcError;
use pretty_assertions::assert_eq;

const TRACE_100: [u64; 100] = [
    2, 3, 2, 5, 0, 1, 7, 9, 4, 2, 10, 3, 1, 10, 10, 5, 10, 6, 5, 0, 6, 4, 2, 9, 7, 2, 2, 5, 3, 9,
    6, 0, 1, 1, 6, 1, 6, 7, 5, 0, 0, 10, 8, 3, 1, 2, 6, 7, 3, 10, 8, 6, 10, 6, 6, 2, 6, 0, 7, 9, 6,
    10, 1, 10, 2, 6, 2, 7, 8, 8, 6, 0, 7, 3, 1, 1, 2, 10, 3, 10, 5, 5, 0, 7, 9, 8, 0, 7, 6, 9, 4,
    9, 4, 8, 3, 6, 5, 3, 2, 9,
];

fn trace_100() -> AccessTrace {
    AccessTrace::from(TRACE_100.to_vec())
}

#[test]
fn test_fenwick_matches_brute_force() {
    let trace = trace_100();
    assert_eq!(analyze(&trace), analyze_brute_force(&trace));
}

#[test]
fn test_histogram_conserves_accesses() {
    let histogram = analyze(&trace_100());

    let finite: u64 = histogram.distances().values().sum();
    assert_eq!(finite + histogram.infinite_count(), 100);
    assert_eq!(histogram.infinite_count(), 11);
    assert_eq!(histogram.total(), 100);
}

#[test]
fn test_distances_bounded_by_distinct_keys() {
    let histogram = analyze(&trace_100());
    let max = histogram.distances().keys().last().copied().unwrap();
    // 11 distinct keys: at most 10 others between two accesses
    assert!(max <= 10);
}

#[test]
fn test_exact_mrc_shape() {
    let curve = build_exact(&analyze(&trace_100())).unwrap();
    let points = curve.points();

    assert_eq!(points[0].1, 1.0);
    assert!(points.windows(2).all(|w| w[0].1 >= w[1].1));
    assert!(points.iter().all(|&(_, ratio)| (0.0..=1.0).contains(&ratio)));
    assert_eq!(curve.infinity(), Some(0.11));
}

#[test]
fn test_binned_mrc_agrees_with_exact() {
    let exact = analyze(&trace_100());
    let binned = exact.to_binned(1, 1 << 20).unwrap();

    let exact_curve = build_exact(&exact).unwrap();
    let binned_curve = build(&binned).unwrap();

    for capacity in 0..=10 {
        assert_eq!(
            binned_curve.miss_ratio_at(capacity),
            exact_curve.miss_ratio_at(capacity),
            "capacity {}",
            capacity
        );
    }
    assert_eq!(binned_curve.infinity(), exact_curve.infinity());
}

#[test]
fn test_small_bounded_histogram_overflows() {
    let exact = analyze(&trace_100());
    let binned = exact.to_binned(2, 2).unwrap();

    let overflow: u64 = exact
        .distances()
        .iter()
        .filter(|(&d, _)| d >= 4)
        .map(|(_, &c)| c)
        .sum();
    assert_eq!(binned.false_infinity(), overflow as f64);
    assert_eq!(binned.infinity(), 11.0);
    assert_eq!(binned.total(), 100.0);
}

#[test]
fn test_empty_trace_has_no_curve() {
    let histogram = analyze(&AccessTrace::default());
    assert!(matches!(
        build_exact(&histogram),
        Err(MrcError::EmptyInput(_))
    ));
}

#[test]
fn test_unsampled_correction_is_identity() {
    let binned = analyze(&trace_100()).to_binned(1, 64).unwrap();
    let metadata = ShardsMetadata::new(1.0, 100, 100);

    let sampled = SampledHistogram::new(binned.clone(), metadata.clone());
    assert_eq!(sampled.corrected_histogram().unwrap(), binned);

    let curve = build(&binned).unwrap();
    assert_eq!(metadata.correct_curve(&curve).unwrap(), curve);
    assert_eq!(metadata.scale_capacity(32.0), 32.0);
}

#[test]
fn test_undersampled_histogram_gains_mass() {
    let binned = analyze(&trace_100()).to_binned(1, 64).unwrap();
    // A perfect 50% sampler would have kept 100 of 200 entries; 90 were kept
    let metadata = ShardsMetadata::new(0.5, 200, 90);

    let corrected = SampledHistogram::new(binned.clone(), metadata)
        .corrected_histogram()
        .unwrap();

    assert_eq!(corrected.total(), binned.total() + 10.0);
    let first = Distance::Finite(0);
    assert_eq!(
        corrected.entries().get(&first).copied().unwrap_or(0.0),
        binned.entries().get(&first).copied().unwrap_or(0.0) + 10.0
    );
}

#[test]
fn test_invalid_sampling_ratio_rejected() {
    let metadata = ShardsMetadata::new(0.0, 100, 0);
    assert!(matches!(
        metadata.histogram_adjustment(),
        Err(MrcError::Sampling(_))
    ));
}

#[test]
fn test_curve_from_dense_round_trip() {
    let curve = MissRatioCurve::from_dense(&[1.0, 0.5, 0.25, 0.1], 4).unwrap();
    assert_eq!(curve.miss_ratio_at(0), 1.0);
    assert_eq!(curve.miss_ratio_at(5), 0.25);
    assert_eq!(curve.to_dense(4).unwrap(), vec![1.0, 0.5, 0.25, 0.1]);
}
