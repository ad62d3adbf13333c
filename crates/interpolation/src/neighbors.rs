//! Neighbor selection by distance threshold

use crate::distance::PointDistance;

/// Points around one target coordinate
#[derive(Debug, Clone, PartialEq)]
pub enum Neighborhood {
    /// At least one point lies within the threshold
    InRange(Vec<PointDistance>),
    /// No point lies within the threshold; callers fall back to the nearest
    NoneInRange,
}

impl Neighborhood {
    pub fn is_empty(&self) -> bool {
        matches!(self, Neighborhood::NoneInRange)
    }
}

/// Keep the points with `distance <= threshold`.
pub fn select_neighbors(distances: &[PointDistance], threshold: f64) -> Neighborhood {
    let within: Vec<PointDistance> = distances
        .iter()
        .copied()
        .filter(|d| d.distance <= threshold)
        .collect();

    if within.is_empty() {
        Neighborhood::NoneInRange
    } else {
        Neighborhood::InRange(within)
    }
}

/// All points at the minimum distance, in point order.
///
/// More than one entry means equidistant nearest points. Empty only when
/// `distances` is empty.
pub fn nearest(distances: &[PointDistance]) -> Vec<PointDistance> {
    let min = distances
        .iter()
        .map(|d| d.distance)
        .fold(f64::INFINITY, f64::min);

    distances
        .iter()
        .copied()
        .filter(|d| d.distance == min)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(index: usize, distance: f64) -> PointDistance {
        PointDistance { index, distance }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let all = [d(0, 1.0), d(1, 2.0), d(2, 2.000001)];
        match select_neighbors(&all, 2.0) {
            Neighborhood::InRange(n) => assert_eq!(n, vec![d(0, 1.0), d(1, 2.0)]),
            Neighborhood::NoneInRange => panic!("expected neighbors"),
        }
    }

    #[test]
    fn test_no_neighbors_is_signalled() {
        let all = [d(0, 5.0), d(1, 7.0)];
        let n = select_neighbors(&all, 4.0);
        assert_eq!(n, Neighborhood::NoneInRange);
        assert!(n.is_empty());
    }

    #[test]
    fn test_empty_input_has_no_neighbors() {
        assert_eq!(select_neighbors(&[], 1.0), Neighborhood::NoneInRange);
        assert!(nearest(&[]).is_empty());
    }

    #[test]
    fn test_nearest_single() {
        let all = [d(0, 3.0), d(1, 1.5), d(2, 9.0)];
        assert_eq!(nearest(&all), vec![d(1, 1.5)]);
    }

    #[test]
    fn test_nearest_keeps_ties() {
        let all = [d(0, 2.0), d(1, 4.0), d(2, 2.0)];
        assert_eq!(nearest(&all), vec![d(0, 2.0), d(2, 2.0)]);
    }
}
