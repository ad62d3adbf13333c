//! Distance from a target coordinate to every measured point

use tablecore::PointSet;

/// Distance from the target to the point at `index` in the point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointDistance {
    pub index: usize,
    pub distance: f64,
}

impl PointDistance {
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.distance == 0.0
    }
}

/// Euclidean distance from `(tx, ty)` to each point, in point order.
///
/// A distance of exactly zero is reported as such; resolving it is left to
/// the weighting step.
pub fn distances(points: &PointSet, tx: f64, ty: f64) -> Vec<PointDistance> {
    points
        .iter()
        .enumerate()
        .map(|(index, p)| PointDistance {
            index,
            distance: p.distance_to(tx, ty),
        })
        .collect()
}
