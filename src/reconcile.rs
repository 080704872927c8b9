//! # Shape reconciliation
//!
//! Every measure in this crate compares one query histogram against `N` reference
//! histograms. Before any elementwise arithmetic happens, the query is validated and
//! tiled so that it lines up with the reference matrix:
//!
//! ```text
//! reference  (N, M)          query (M,) or (1, M)
//!   [ d00 d01 ... d0M ]        [ q0 q1 ... qM ]
//!   [ d10 d11 ... d1M ]            |
//!   [ ...             ]            v  tile N times
//!                             [ q0 q1 ... qM ]
//!                             [ q0 q1 ... qM ]
//!                             [ ...          ]
//! ```
//!
//! Queries arrive in three forms (see [`Query`]): a plain vector, a single-row matrix, or a
//! dynamically ranked array. All three funnel into the same rank check.
//!
//! # Examples
//!
//! ```rust
//! use hdist::reconcile::reconcile;
//! use ndarray::array;
//!
//! let reference = array![[0.5, 0.5], [0.2, 0.8], [0.9, 0.1]];
//! let query = array![0.3, 0.7];
//!
//! let tiled = reconcile(reference.view(), &query).unwrap();
//! assert_eq!(tiled.dim(), (3, 2));
//! assert!(tiled.rows().into_iter().all(|row| row == query));
//! ```

use ndarray::{Array1, Array2, ArrayD, ArrayView1, ArrayView2, ArrayViewD, Axis, Ix1, Ix2};
use thiserror::Error;

/// Shape errors raised while lining a query up with the reference matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The query has more dimensions than a vector or a single-row matrix.
    #[error("query has more dimensions than expected (rank {rank})")]
    UnexpectedRank { rank: usize },

    /// A matrix query must have exactly one row.
    #[error("query matrix must have exactly one row, got {rows}")]
    MultipleRows { rows: usize },

    /// Query and reference histograms use different bin counts.
    #[error("bins dimensions don't match: query has {query}, reference has {reference}")]
    BinMismatch { query: usize, reference: usize },
}

/// A query histogram in any of the accepted shapes.
#[derive(Debug, Clone)]
pub enum Query<'a> {
    /// Shape `(M,)`.
    Vector(ArrayView1<'a, f64>),
    /// Shape `(1, M)`.
    Row(ArrayView2<'a, f64>),
    /// Rank only known at runtime.
    Dyn(ArrayViewD<'a, f64>),
}

impl<'a> Query<'a> {
    /// Number of dimensions of the underlying array.
    pub fn rank(&self) -> usize {
        match self {
            Query::Vector(_) => 1,
            Query::Row(_) => 2,
            Query::Dyn(v) => v.ndim(),
        }
    }

    /// Collapse the query to a single row of bins.
    pub fn into_row(self) -> Result<ArrayView1<'a, f64>, ShapeError> {
        match self {
            Query::Vector(v) => Ok(v),
            Query::Row(m) => {
                if m.nrows() != 1 {
                    return Err(ShapeError::MultipleRows { rows: m.nrows() });
                }
                Ok(m.index_axis_move(Axis(0), 0))
            }
            Query::Dyn(d) => {
                let rank = d.ndim();
                match rank {
                    1 => d
                        .into_dimensionality::<Ix1>()
                        .map_err(|_| ShapeError::UnexpectedRank { rank }),
                    2 => {
                        let m = d
                            .into_dimensionality::<Ix2>()
                            .map_err(|_| ShapeError::UnexpectedRank { rank })?;
                        Query::Row(m).into_row()
                    }
                    _ => Err(ShapeError::UnexpectedRank { rank }),
                }
            }
        }
    }
}

impl<'a> From<ArrayView1<'a, f64>> for Query<'a> {
    fn from(v: ArrayView1<'a, f64>) -> Self {
        Query::Vector(v)
    }
}

impl<'a> From<ArrayView2<'a, f64>> for Query<'a> {
    fn from(m: ArrayView2<'a, f64>) -> Self {
        Query::Row(m)
    }
}

impl<'a> From<ArrayViewD<'a, f64>> for Query<'a> {
    fn from(d: ArrayViewD<'a, f64>) -> Self {
        Query::Dyn(d)
    }
}

impl<'a> From<&'a Array1<f64>> for Query<'a> {
    fn from(v: &'a Array1<f64>) -> Self {
        Query::Vector(v.view())
    }
}

impl<'a> From<&'a Array2<f64>> for Query<'a> {
    fn from(m: &'a Array2<f64>) -> Self {
        Query::Row(m.view())
    }
}

impl<'a> From<&'a ArrayD<f64>> for Query<'a> {
    fn from(d: &'a ArrayD<f64>) -> Self {
        Query::Dyn(d.view())
    }
}

impl<'a> From<&'a [f64]> for Query<'a> {
    fn from(s: &'a [f64]) -> Self {
        Query::Vector(ArrayView1::from(s))
    }
}

impl<'a> From<&'a Vec<f64>> for Query<'a> {
    fn from(s: &'a Vec<f64>) -> Self {
        Query::Vector(ArrayView1::from(s.as_slice()))
    }
}

impl<'a, const M: usize> From<&'a [f64; M]> for Query<'a> {
    fn from(s: &'a [f64; M]) -> Self {
        Query::Vector(ArrayView1::from(&s[..]))
    }
}

/// Validate `query` against `reference` and return it as a single row of bins.
///
/// Checks run in order: rank, row count, bin count. Nothing is copied.
pub fn query_row<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
) -> Result<ArrayView1<'a, f64>, ShapeError> {
    let query = query.into();
    let rank = query.rank();
    let row = query.into_row().map_err(|e| {
        tracing::debug!(rank, error = %e, "rejected query shape");
        e
    })?;

    let m = reference.ncols();
    if row.len() != m {
        let e = ShapeError::BinMismatch {
            query: row.len(),
            reference: m,
        };
        tracing::debug!(error = %e, "rejected query shape");
        return Err(e);
    }
    Ok(row)
}

/// Validate `query` against `reference` and tile it to the reference's shape.
///
/// Validation is [`query_row`]. An empty reference (`N = 0`) yields a `(0, M)` matrix.
pub fn reconcile<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
) -> Result<Array2<f64>, ShapeError> {
    let row = query_row(reference, query)?;
    Ok(Array2::from_shape_fn(reference.dim(), |(_, j)| row[j]))
}
