//! # Mode catalog and dispatch
//!
//! Callers that pick a measure at runtime (from a config file, a CLI flag, a request)
//! name it by string. [`Mode`] is the closed set of those names; [`calculate_distances`]
//! parses the name and runs the matching measure. Unknown names are an error, never a
//! silent fallback.
//!
//! | Key | Measure | Higher score means |
//! |-----|---------|--------------------|
//! | `euclidean` | [`measures::euclidean`] | further |
//! | `distance_L` | [`measures::distance_l`] | further |
//! | `distance_x2` | [`measures::distance_x2`] | further |
//! | `intersection` | [`measures::intersection`] | closer |
//! | `kl_divergence` | [`measures::kl_divergence`] | further |
//! | `js_divergence` | [`measures::js_divergence`] | further |
//! | `hellinger` | [`measures::hellinger`] | closer |

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, ArrayView2};

use crate::measures;
use crate::reconcile::Query;
use crate::{Error, Result};

/// A histogram measure selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Sum of per-bin √((D-Q)²).
    #[default]
    Euclidean,
    /// L1 distance.
    DistanceL,
    /// Chi-squared statistic.
    DistanceX2,
    /// Histogram intersection (similarity).
    Intersection,
    /// KL divergence of the query from the reference.
    KlDivergence,
    /// Jensen-Shannon divergence.
    JsDivergence,
    /// Bhattacharyya coefficient under its historical name (similarity).
    Hellinger,
}

impl Mode {
    /// Every mode, in catalog order.
    pub const ALL: [Mode; 7] = [
        Mode::Euclidean,
        Mode::DistanceL,
        Mode::DistanceX2,
        Mode::Intersection,
        Mode::KlDivergence,
        Mode::JsDivergence,
        Mode::Hellinger,
    ];

    /// The exact key accepted by [`Mode::from_str`].
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Euclidean => "euclidean",
            Mode::DistanceL => "distance_L",
            Mode::DistanceX2 => "distance_x2",
            Mode::Intersection => "intersection",
            Mode::KlDivergence => "kl_divergence",
            Mode::JsDivergence => "js_divergence",
            Mode::Hellinger => "hellinger",
        }
    }

    /// True when a higher score means a closer match.
    pub fn is_similarity(self) -> bool {
        matches!(self, Mode::Intersection | Mode::Hellinger)
    }

    /// True when the formula divides by, or takes the log of, bin values.
    pub fn requires_positive(self) -> bool {
        matches!(
            self,
            Mode::DistanceX2 | Mode::KlDivergence | Mode::JsDivergence
        )
    }

    /// Run this mode's measure.
    pub fn compute<'a>(
        self,
        reference: ArrayView2<'_, f64>,
        query: impl Into<Query<'a>>,
    ) -> Result<Array1<f64>> {
        tracing::trace!(mode = self.as_str(), shape = ?reference.dim(), "computing scores");
        match self {
            Mode::Euclidean => measures::euclidean(reference, query),
            Mode::DistanceL => measures::distance_l(reference, query),
            Mode::DistanceX2 => measures::distance_x2(reference, query),
            Mode::Intersection => measures::intersection(reference, query),
            Mode::KlDivergence => measures::kl_divergence(reference, query),
            Mode::JsDivergence => measures::js_divergence(reference, query),
            Mode::Hellinger => measures::hellinger(reference, query),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    /// Case-sensitive match against the seven catalog keys.
    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::UnsupportedMode(s.to_string()))
    }
}

/// Score every reference row against `query` with the measure named `mode`.
///
/// # Errors
///
/// - [`Error::UnsupportedMode`] if `mode` is not one of the seven keys.
/// - [`Error::Shape`] if the query cannot be lined up with `reference`.
///
/// # Examples
///
/// ```rust
/// use hdist::calculate_distances;
/// use ndarray::array;
///
/// let reference = array![[0.5, 0.5], [0.2, 0.8]];
/// let d = calculate_distances(reference.view(), &[0.5, 0.5], "distance_L").unwrap();
/// assert!(d[0].abs() < 1e-12);
/// assert!((d[1] - 0.6).abs() < 1e-12);
///
/// assert!(calculate_distances(reference.view(), &[0.5, 0.5], "bogus_mode").is_err());
/// ```
pub fn calculate_distances<'a>(
    reference: ArrayView2<'_, f64>,
    query: impl Into<Query<'a>>,
    mode: &str,
) -> Result<Array1<f64>> {
    let mode: Mode = mode.parse().map_err(|e| {
        tracing::debug!(error = %e, "rejected mode");
        e
    })?;
    tracing::debug!(%mode, rows = reference.nrows(), bins = reference.ncols(), "calculating distances");
    mode.compute(reference, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn keys_round_trip_through_from_str() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
            assert_eq!(mode.to_string(), mode.as_str());
        }
    }

    #[test]
    fn keys_are_case_sensitive() {
        assert!("distance_l".parse::<Mode>().is_err());
        assert!("Euclidean".parse::<Mode>().is_err());
        assert!("distance_L".parse::<Mode>().is_ok());
    }

    #[test]
    fn unknown_mode_names_the_input() {
        let reference = array![[0.5, 0.5]];
        let err = calculate_distances(reference.view(), &[0.5, 0.5], "bogus_mode").unwrap_err();
        match err {
            Error::UnsupportedMode(name) => assert_eq!(name, "bogus_mode"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_mode_wins_over_shape_error() {
        // The mode is parsed before any shape work happens.
        let reference = array![[0.5, 0.5]];
        let err = calculate_distances(reference.view(), &[1.0], "nope").unwrap_err();
        assert!(matches!(err, Error::UnsupportedMode(_)));
    }

    #[test]
    fn dispatcher_matches_direct_calls() {
        let reference = array![[0.1, 0.2, 0.7], [0.3, 0.3, 0.4], [0.6, 0.3, 0.1]];
        let query = array![0.2, 0.5, 0.3];
        let direct = [
            measures::euclidean(reference.view(), &query).unwrap(),
            measures::distance_l(reference.view(), &query).unwrap(),
            measures::distance_x2(reference.view(), &query).unwrap(),
            measures::intersection(reference.view(), &query).unwrap(),
            measures::kl_divergence(reference.view(), &query).unwrap(),
            measures::js_divergence(reference.view(), &query).unwrap(),
            measures::hellinger(reference.view(), &query).unwrap(),
        ];
        for (mode, expected) in Mode::ALL.into_iter().zip(direct) {
            let got = calculate_distances(reference.view(), &query, mode.as_str()).unwrap();
            assert_eq!(got, expected, "mode {mode}");
        }
    }

    #[test]
    fn default_mode_is_euclidean() {
        assert_eq!(Mode::default(), Mode::Euclidean);
    }

    #[test]
    fn similarity_and_positivity_flags() {
        let sims: Vec<_> = Mode::ALL.into_iter().filter(|m| m.is_similarity()).collect();
        assert_eq!(sims, vec![Mode::Intersection, Mode::Hellinger]);
        assert!(!Mode::DistanceL.requires_positive());
        assert!(Mode::KlDivergence.requires_positive());
    }
}
