//! # hdist
//!
//! Distances and divergences between one query histogram and a matrix of reference
//! histograms.
//!
//! Histogram retrieval boils down to: take the query's histogram, compare it with every
//! histogram in the collection, sort. This crate is the "compare" step. Each measure
//! lines the query up with the `N` reference rows, applies a per-bin formula, and sums
//! over bins to produce `N` scores.
//!
//! ## Measures
//!
//! | Key | Function | Formula (summed over bins) |
//! |-----|----------|----------------------------|
//! | `euclidean` | [`euclidean`] | √((D-Q)²) |
//! | `distance_L` | [`distance_l`] | \|D-Q\| |
//! | `distance_x2` | [`distance_x2`] | (D-Q)² / (D+Q) |
//! | `intersection` | [`intersection`] | min(D, Q) |
//! | `hellinger` | [`hellinger`] | √(D·Q) |
//! | `kl_divergence` | [`kl_divergence`] | Q·ln(Q/D) |
//! | `js_divergence` | [`js_divergence`] | H(½(D+Q)) - ½(H(D)+H(Q)) |
//!
//! `intersection` and `hellinger` are similarities (higher = closer); the rest are
//! distances or divergences (lower = closer).
//!
//! ## Quick Start
//!
//! ```rust
//! use hdist::{calculate_distances, Mode};
//! use ndarray::array;
//!
//! let reference = array![[0.5, 0.5], [0.2, 0.8]];
//! let query = array![0.5, 0.5];
//!
//! let l1 = calculate_distances(reference.view(), &query, "distance_L").unwrap();
//! assert!((l1[1] - 0.6).abs() < 1e-12);
//!
//! // Same thing with a typed mode.
//! let overlap = Mode::Intersection.compute(reference.view(), &query).unwrap();
//! assert!((overlap[0] - 1.0).abs() < 1e-12);
//! assert!((overlap[1] - 0.7).abs() < 1e-12);
//! ```
//!
//! ## Naming quirks
//!
//! Two names do not match their textbook meaning, and are kept for compatibility:
//!
//! - `euclidean` has no outer square root, so it equals `distance_L`.
//! - `hellinger` returns the Bhattacharyya coefficient Σ√(D·Q), a similarity. The
//!   Hellinger distance is `√(1 - BC)`.
//!
//! ## What Can Go Wrong
//!
//! 1. **Zero bins in log/quotient measures**: `distance_x2`, `kl_divergence` and
//!    `js_divergence` return NaN or ±inf on zero bins. Nothing is clamped. Use
//!    [`calculate_distances_checked`] to get [`Error::NonPositive`] instead.
//! 2. **Not normalized**: KL/JS and the Bhattacharyya coefficient are only meaningful for
//!    unit-sum histograms. Normalize before calling.
//! 3. **Shape**: the query must be `(M,)` or `(1, M)` with the reference's `M`, otherwise
//!    [`Error::Shape`].
//! 4. **Units**: KL is in nats (natural log), JS and [`shannon_entropy`] in bits.

use thiserror::Error;

pub mod domain;
pub mod measures;
pub mod mode;
pub mod rank;
pub mod reconcile;

pub use domain::{calculate_distances_checked, ensure_positive, Role};
pub use measures::{
    distance_l, distance_x2, euclidean, hellinger, intersection, js_divergence, kl_divergence,
    shannon_entropy,
};
pub use mode::{calculate_distances, Mode};
pub use rank::{rank, Ranked};
pub use reconcile::{query_row, reconcile, Query, ShapeError};

/// Error types for histogram comparisons.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("unsupported mode: {0:?}")]
    UnsupportedMode(String),

    #[error("{role} histogram has non-positive bin at row {row}, bin {bin}: {value}")]
    NonPositive {
        role: Role,
        row: usize,
        bin: usize,
        value: f64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
