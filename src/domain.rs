//! Strict positivity checks for the logarithmic and quotient measures.
//!
//! The plain measures let NaN and ±inf flow through. When a caller would rather get a
//! named failure, [`calculate_distances_checked`] validates the bins first, and only for
//! the modes where [`Mode::requires_positive`] holds.

use ndarray::{Array1, ArrayView2, Axis};

use crate::mode::Mode;
use crate::reconcile::{query_row, Query};
use crate::{Error, Result};

/// Which side of the comparison a bad bin came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Reference,
    Query,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Role::Reference => "reference",
            Role::Query => "query",
        })
    }
}

/// Fail on the first bin (row-major order) that is not strictly positive, NaN included.
pub fn ensure_positive(matrix: ArrayView2<'_, f64>, role: Role) -> Result<()> {
    for ((row, bin), &value) in matrix.indexed_iter() {
        if value.is_nan() || value <= 0.0 {
            return Err(Error::NonPositive {
                role,
                row,
                bin,
                value,
            });
        }
    }
    Ok(())
}

/// Like [`crate::calculate_distances`], but rejects non-positive bins for the modes whose
/// formulas are undefined on them.
///
/// Shape errors come first. The query's bins are only checked when there is at least one
/// reference row to compare it with.
///
/// # Examples
///
/// ```rust
/// use hdist::{calculate_distances, calculate_distances_checked, Error};
/// use ndarray::array;
///
/// let reference = array![[0.0, 1.0]];
/// let unchecked = calculate_distances(reference.view(), &[0.5, 0.5], "kl_divergence").unwrap();
/// assert!(!unchecked[0].is_finite());
///
/// let err = calculate_distances_checked(reference.view(), &[0.5, 0.5], "kl_divergence").unwrap_err();
/// assert!(matches!(err, Error::NonPositive { row: 0, bin: 0, .. }));
///
/// // L1 is fine with zeros.
/// assert!(calculate_distances_checked(reference.view(), &[0.5, 0.5], "distance_L").is_ok());
/// ```
pub fn calculate_distances_checked<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
    mode: &str,
) -> Result<Array1<f64>> {
    let mode: Mode = mode.parse()?;
    if !mode.requires_positive() {
        return mode.compute(reference, query);
    }

    let row = query_row(reference, query)?;
    if reference.nrows() > 0 {
        ensure_positive(reference, Role::Reference)?;
        ensure_positive(row.insert_axis(Axis(0)), Role::Query)?;
    }
    mode.compute(reference, row)
}
