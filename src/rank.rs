//! Ranking reference rows against a query.
//!
//! Retrieval wants an ordering, not raw scores. [`rank`] scores every row with a
//! [`Mode`] and sorts best match first: ascending for distances and divergences,
//! descending for the similarity modes (`intersection`, `hellinger`).

use std::cmp::Ordering;

use ndarray::ArrayView2;

use crate::mode::Mode;
use crate::reconcile::Query;
use crate::Result;

/// One reference row and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    /// Row index into the reference matrix.
    pub index: usize,
    /// Score under the ranking mode.
    pub score: f64,
}

/// Score and order reference rows, best match first, keeping at most `k` when given.
///
/// NaN scores sort last. Equal scores keep reference row order.
///
/// # Examples
///
/// ```rust
/// use hdist::{rank, Mode};
/// use ndarray::array;
///
/// let reference = array![[0.2, 0.8], [0.5, 0.5], [0.9, 0.1]];
///
/// let by_l1 = rank(reference.view(), &[0.45, 0.55], Mode::DistanceL, None).unwrap();
/// assert_eq!(by_l1[0].index, 1);
///
/// let by_overlap = rank(reference.view(), &[0.45, 0.55], Mode::Intersection, Some(1)).unwrap();
/// assert_eq!(by_overlap.len(), 1);
/// assert_eq!(by_overlap[0].index, 1);
/// ```
pub fn rank<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
    mode: Mode,
    k: Option<usize>,
) -> Result<Vec<Ranked>> {
    let scores = mode.compute(reference, query)?;
    let mut ranked: Vec<Ranked> = scores
        .iter()
        .enumerate()
        .map(|(index, &score)| Ranked { index, score })
        .collect();

    let descending = mode.is_similarity();
    ranked.sort_by(|a, b| compare(a.score, b.score, descending));

    if let Some(k) = k {
        ranked.truncate(k);
    }
    tracing::debug!(%mode, kept = ranked.len(), "ranked reference rows");
    Ok(ranked)
}

fn compare(a: f64, b: f64, descending: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if descending => b.total_cmp(&a),
        (false, false) => a.total_cmp(&b),
    }
}
