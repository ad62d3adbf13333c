//! Inverse distance weighting for one grid cell
//!
//! A cell's weights depend only on the point coordinates, so they are
//! computed once per cell ([`CellWeights`]) and then applied to every
//! requested channel.
//!
//! Resolution order:
//! 1. points at distance exactly zero: arithmetic mean of their values
//! 2. points within the threshold: weighted mean with `w_i ~ 1 / d_i`
//! 3. otherwise: mean of the globally nearest point(s)

use tablecore::{InterpolationConfig, PointSet, Result, TableError};

use crate::distance::{PointDistance, distances};
use crate::neighbors::{Neighborhood, nearest, select_neighbors};

/// How the value at one grid cell is assembled from point values
#[derive(Debug, Clone, PartialEq)]
pub enum CellWeights {
    /// Points coinciding with the cell; their values are averaged
    Exact(Vec<usize>),
    /// `(point index, weight)` over neighbors within the threshold.
    ///
    /// Weights are `d_min / d_i`: proportional to `1 / d_i`, in `(0, 1]`.
    Weighted(Vec<(usize, f64)>),
    /// Nearest point(s) when nothing lies within the threshold
    Nearest(Vec<usize>),
}

impl CellWeights {
    /// Weights for the cell at `(tx, ty)`.
    pub fn compute(points: &PointSet, tx: f64, ty: f64, config: &InterpolationConfig) -> Result<Self> {
        if points.is_empty() {
            return Err(TableError::EmptyPointSet);
        }
        Ok(Self::from_distances(&distances(points, tx, ty), config.distance_threshold))
    }

    /// Weights from precomputed distances. `distances` must not be empty.
    pub fn from_distances(distances: &[PointDistance], threshold: f64) -> Self {
        let exact: Vec<usize> = distances
            .iter()
            .filter(|d| d.is_exact())
            .map(|d| d.index)
            .collect();
        if !exact.is_empty() {
            return CellWeights::Exact(exact);
        }

        match select_neighbors(distances, threshold) {
            Neighborhood::InRange(neighbors) => {
                let d_min = neighbors
                    .iter()
                    .map(|n| n.distance)
                    .fold(f64::INFINITY, f64::min);
                CellWeights::Weighted(
                    neighbors
                        .iter()
                        .map(|n| (n.index, d_min / n.distance))
                        .collect(),
                )
            }
            Neighborhood::NoneInRange => {
                CellWeights::Nearest(nearest(distances).iter().map(|n| n.index).collect())
            }
        }
    }

    /// Apply the weights to one channel; `values` is indexed like the point set.
    ///
    /// The result lies within the range of the contributing values and does
    /// not depend on point order.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        let terms: Vec<(f64, f64)> = match self {
            CellWeights::Exact(indices) | CellWeights::Nearest(indices) => {
                indices.iter().map(|&i| (1.0, values[i])).collect()
            }
            CellWeights::Weighted(weights) => weights.iter().map(|&(i, w)| (w, values[i])).collect(),
        };
        weighted_mean(terms)
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, CellWeights::Exact(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CellWeights::Nearest(_))
    }
}

/// Weighted mean as a running convex combination, so large finite values
/// cannot overflow an intermediate sum. Terms are folded in a canonical
/// order (weight, then value). NaN for no terms, which a cell never has.
fn weighted_mean(mut terms: Vec<(f64, f64)>) -> f64 {
    if terms.is_empty() {
        return f64::NAN;
    }
    terms.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    let mut m = 0.0;
    let mut total = 0.0;
    for &(w, v) in &terms {
        total += w;
        let a = w / total;
        m = (1.0 - a) * m + a * v;
        lo = lo.min(v);
        hi = hi.max(v);
    }
    // rounding may step just outside the hull
    m.clamp(lo, hi)
}

/// Interpolated value of `channel` at `(tx, ty)`.
///
/// Always finite for a non-empty point set.
pub fn interpolate(
    points: &PointSet,
    channel: &str,
    tx: f64,
    ty: f64,
    config: &InterpolationConfig,
) -> Result<f64> {
    config.validate()?;
    if points.is_empty() {
        return Err(TableError::EmptyPointSet);
    }
    let values = points.channel_values(channel)?;
    let weights = CellWeights::compute(points, tx, ty, config)?;
    Ok(weights.evaluate(&values))
}
