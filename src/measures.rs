//! # Histogram measures
//!
//! Each measure takes a reference matrix `D` of shape `(N, M)` and one query histogram,
//! tiles the query to `Q` (see [`crate::reconcile`]), applies a per-bin expression and
//! sums over the `M` bins. The result holds one score per reference row.
//!
//! | Measure | Per bin | Kind |
//! |---------|---------|------|
//! | [`euclidean`] | √((D-Q)²) | distance |
//! | [`distance_l`] | \|D-Q\| | distance |
//! | [`distance_x2`] | (D-Q)² / (D+Q) | distance |
//! | [`intersection`] | min(D, Q) | similarity |
//! | [`hellinger`] | √(D·Q) | similarity |
//! | [`kl_divergence`] | Q·ln(Q/D) | divergence |
//! | [`js_divergence`] | H(½(D+Q)) - ½(H(D)+H(Q)) | divergence |
//!
//! ## Domain
//!
//! Nothing here clamps or smooths. Zero bins turn `distance_x2`, `kl_divergence` and
//! [`shannon_entropy`] into NaN or ±inf, and those values are returned unchanged.
//! Use [`crate::calculate_distances_checked`] to turn that into an error instead.

use crate::reconcile::{reconcile, Query};
use crate::Result;
use ndarray::{Array1, ArrayView2, Axis, Zip};

/// Apply `f(d, q)` to every bin pair and sum along the bin axis.
fn reduce_bins<'a, F>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
    f: F,
) -> Result<Array1<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    let tiled = reconcile(reference, query)?;
    let per_bin = Zip::from(&reference)
        .and(&tiled)
        .map_collect(|&d, &q| f(d, q));
    Ok(per_bin.sum_axis(Axis(1)))
}

/// "Euclidean" score: Σ √((D-Q)²).
///
/// There is no outer square root, so this is the sum of absolute differences and equals
/// [`distance_l`] bin for bin. The name is kept for compatibility with existing callers;
/// use [`distance_l`] when you mean L1.
///
/// # Examples
///
/// ```rust
/// use hdist::{distance_l, euclidean};
/// use ndarray::array;
///
/// let reference = array![[0.5, 0.5], [0.2, 0.8]];
/// let e = euclidean(reference.view(), &[0.5, 0.5]).unwrap();
/// let l = distance_l(reference.view(), &[0.5, 0.5]).unwrap();
/// assert!((e[1] - l[1]).abs() < 1e-12);
/// ```
pub fn euclidean<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
) -> Result<Array1<f64>> {
    reduce_bins(reference, query, |d, q| (d - q).powi(2).sqrt())
}

/// L1 (Manhattan) distance: Σ |D-Q|.
pub fn distance_l<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
) -> Result<Array1<f64>> {
    reduce_bins(reference, query, |d, q| (d - q).abs())
}

/// Chi-squared statistic: Σ (D-Q)² / (D+Q).
///
/// A bin where `D + Q == 0` divides by zero and yields NaN.
pub fn distance_x2<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
) -> Result<Array1<f64>> {
    reduce_bins(reference, query, |d, q| (d - q).powi(2) / (d + q))
}

/// Histogram intersection: Σ min(D, Q).
///
/// A similarity: higher means closer. For unit-sum histograms it lies in `[0, 1]`.
/// NaN in either bin propagates.
pub fn intersection<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
) -> Result<Array1<f64>> {
    reduce_bins(reference, query, nan_min)
}

/// Σ √(D·Q).
///
/// Despite the name this is the Bhattacharyya coefficient, a similarity in `[0, 1]` for
/// unit-sum histograms, not the Hellinger distance `√(1 - BC)`. The formula is kept as is
/// for compatibility; derive the distance from it if that is what you need.
///
/// # Examples
///
/// ```rust
/// use hdist::hellinger;
/// use ndarray::array;
///
/// let reference = array![[0.3, 0.7]];
/// let bc = hellinger(reference.view(), &[0.3, 0.7]).unwrap();
/// assert!((bc[0] - 1.0).abs() < 1e-12);
///
/// let hellinger_distance = (1.0 - bc[0]).max(0.0).sqrt();
/// assert!(hellinger_distance < 1e-6);
/// ```
pub fn hellinger<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
) -> Result<Array1<f64>> {
    reduce_bins(reference, query, |d, q| (d * q).sqrt())
}

/// Kullback-Leibler divergence of the query from each reference row, in nats:
/// Σ Q·ln(Q/D).
///
/// Zero or negative bins on either side make the result NaN or infinite.
pub fn kl_divergence<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
) -> Result<Array1<f64>> {
    reduce_bins(reference, query, |d, q| q * (q / d).ln())
}

/// Shannon entropy of every row, in bits: -Σ x·log₂(x).
///
/// No bins are skipped: a zero bin gives `0 · -inf = NaN`.
///
/// # Examples
///
/// ```rust
/// use hdist::shannon_entropy;
/// use ndarray::array;
///
/// let h = shannon_entropy(array![[0.25, 0.25, 0.25, 0.25], [0.5, 0.5, 0.0, 0.0]].view());
/// assert!((h[0] - 2.0).abs() < 1e-12);
/// assert!(h[1].is_nan());
/// ```
pub fn shannon_entropy(matrix: ArrayView2<'_, f64>) -> Array1<f64> {
    -matrix.mapv(|x| x * x.log2()).sum_axis(Axis(1))
}

/// Jensen-Shannon divergence in bits: H(½(D+Q)) - ½(H(D) + H(Q)).
///
/// Symmetric in `D` and `Q`, bounded by 1 for unit-sum histograms.
pub fn js_divergence<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
) -> Result<Array1<f64>> {
    let tiled = reconcile(reference, query)?;
    let mixture = (&reference + &tiled) * 0.5;
    let h_mix = shannon_entropy(mixture.view());
    let h_ref = shannon_entropy(reference);
    let h_query = shannon_entropy(tiled.view());
    Ok(h_mix - (h_ref + h_query) * 0.5)
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}
