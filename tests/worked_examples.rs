//! End-to-end checks through the string dispatcher.

use hdist::{calculate_distances, rank, Error, Mode, ShapeError};
use ndarray::{array, Array2};

fn assert_close(got: &[f64], expected: &[f64]) {
    assert_eq!(got.len(), expected.len(), "length: {got:?} vs {expected:?}");
    for (g, e) in got.iter().zip(expected) {
        assert!((g - e).abs() < 1e-12, "{got:?} vs {expected:?}");
    }
}

#[test]
fn l1_example() {
    let reference = array![[0.5, 0.5], [0.2, 0.8]];
    let d = calculate_distances(reference.view(), &[0.5, 0.5], "distance_L").unwrap();
    assert_close(d.as_slice().unwrap(), &[0.0, 0.6]);
}

#[test]
fn intersection_example() {
    let reference = array![[0.5, 0.5], [0.2, 0.8]];
    let d = calculate_distances(reference.view(), &[0.5, 0.5], "intersection").unwrap();
    assert_close(d.as_slice().unwrap(), &[1.0, 0.7]);
}

#[test]
fn row_shaped_query_gives_same_scores() {
    let reference = array![[0.1, 0.6, 0.3], [0.3, 0.3, 0.4]];
    let as_vec = array![0.2, 0.5, 0.3];
    let as_row = array![[0.2, 0.5, 0.3]];
    for mode in Mode::ALL {
        let a = calculate_distances(reference.view(), &as_vec, mode.as_str()).unwrap();
        let b = calculate_distances(reference.view(), &as_row, mode.as_str()).unwrap();
        assert_eq!(a, b, "mode {mode}");
    }
}

#[test]
fn every_mode_returns_one_score_per_row() {
    let reference = array![[0.1, 0.9], [0.4, 0.6], [0.7, 0.3], [0.5, 0.5]];
    for mode in Mode::ALL {
        let d = calculate_distances(reference.view(), &[0.3, 0.7], mode.as_str()).unwrap();
        assert_eq!(d.len(), 4, "mode {mode}");
        assert!(d.iter().all(|x| x.is_finite()), "mode {mode}: {d}");
    }
}

#[test]
fn empty_reference_gives_empty_vector_for_every_mode() {
    let reference = Array2::<f64>::zeros((0, 3));
    for mode in Mode::ALL {
        let d = calculate_distances(reference.view(), &[0.2, 0.3, 0.5], mode.as_str()).unwrap();
        assert!(d.is_empty(), "mode {mode}");
    }
}

#[test]
fn errors_abort_the_whole_call() {
    let reference = array![[0.5, 0.5], [0.2, 0.8]];

    let err = calculate_distances(reference.view(), &[0.5, 0.25, 0.25], "hellinger").unwrap_err();
    assert_eq!(
        err,
        Error::Shape(ShapeError::BinMismatch {
            query: 3,
            reference: 2
        })
    );
    assert_eq!(
        err.to_string(),
        "bins dimensions don't match: query has 3, reference has 2"
    );

    let err = calculate_distances(reference.view(), &[0.5, 0.5], "bogus_mode").unwrap_err();
    assert_eq!(err, Error::UnsupportedMode("bogus_mode".into()));
}

#[test]
fn retrieval_picks_the_closest_histogram() {
    let reference = array![
        [0.70, 0.20, 0.10],
        [0.10, 0.20, 0.70],
        [0.33, 0.34, 0.33],
        [0.15, 0.25, 0.60],
    ];
    let query = [0.12, 0.22, 0.66];
    for mode in Mode::ALL {
        let best = rank(reference.view(), &query, mode, Some(2)).unwrap();
        let mut top: Vec<usize> = best.iter().map(|r| r.index).collect();
        top.sort_unstable();
        assert_eq!(top, vec![1, 3], "mode {mode}");
    }
}

#[test]
fn zero_bin_histograms_score_zero_for_every_mode() {
    let reference = Array2::<f64>::zeros((3, 0));
    let empty: [f64; 0] = [];
    for mode in Mode::ALL {
        let d = calculate_distances(reference.view(), &empty, mode.as_str()).unwrap();
        assert_eq!(d.len(), 3, "mode {mode}");
        assert!(d.iter().all(|&x| x == 0.0), "mode {mode}: {d}");
    }
}
