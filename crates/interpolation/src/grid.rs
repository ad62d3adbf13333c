//! Grid construction and per-cell evaluation
//!
//! Rows of the grid are evaluated in parallel. Every cell is a pure function
//! of the point set, its coordinate and the configuration, so the output is
//! identical to a sequential sweep.

use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::Array2;
use rayon::prelude::*;
use tablecore::{GridSpec, InterpolationConfig, PointSet, ResultMatrix, Result, TableError};

use crate::distance::distances;
use crate::weights::CellWeights;

/// Rows finished so far out of the grid's total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridProgress {
    pub completed_rows: usize,
    pub total_rows: usize,
}

/// Square coordinate grid; both axes share the same samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    axis: Vec<f64>,
}

impl Grid {
    pub fn new(spec: &GridSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Grid { axis: spec.axis() })
    }

    pub fn size(&self) -> usize {
        self.axis.len()
    }

    pub fn axis(&self) -> &[f64] {
        &self.axis
    }

    /// Coordinate `(x_i, y_j)` of cell `(i, j)`
    pub fn coordinate(&self, i: usize, j: usize) -> (f64, f64) {
        (self.axis[i], self.axis[j])
    }

    /// Cartesian product of the axes as `((i, j), (x, y))`, row by row
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), (f64, f64))> + '_ {
        let n = self.size();
        (0..n).flat_map(move |i| (0..n).map(move |j| ((i, j), self.coordinate(i, j))))
    }

    /// Evaluate several channels over the grid with one distance scan per cell.
    ///
    /// The returned matrices follow the order of `channels`. `progress` is
    /// called once per finished row, possibly from several threads.
    pub fn evaluate<S, F>(
        &self,
        points: &PointSet,
        channels: &[S],
        config: &InterpolationConfig,
        progress: F,
    ) -> Result<Vec<ResultMatrix>>
    where
        S: AsRef<str>,
        F: Fn(GridProgress) + Sync,
    {
        config.validate()?;
        if points.is_empty() {
            return Err(TableError::EmptyPointSet);
        }
        // channel_values[c][k]: channel c at point k
        let channel_values = channels
            .iter()
            .map(|c| points.channel_values(c.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let n = self.size();
        let threshold = config.distance_threshold;
        let completed = AtomicUsize::new(0);

        // rows[i][c][j]
        let rows: Vec<Vec<Vec<f64>>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let mut row = vec![vec![0.0; n]; channel_values.len()];
                for j in 0..n {
                    let (x, y) = self.coordinate(i, j);
                    let weights = CellWeights::from_distances(&distances(points, x, y), threshold);
                    for (c, values) in channel_values.iter().enumerate() {
                        row[c][j] = weights.evaluate(values);
                    }
                }

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                progress(GridProgress { completed_rows: done, total_rows: n });
                row
            })
            .collect();

        Ok((0..channel_values.len())
            .map(|c| ResultMatrix::from_array(Array2::from_shape_fn((n, n), |(i, j)| rows[i][c][j])))
            .collect())
    }
}

/// Interpolate one channel over the whole grid.
pub fn build_matrix(
    points: &PointSet,
    channel: &str,
    spec: &GridSpec,
    config: &InterpolationConfig,
) -> Result<ResultMatrix> {
    let grid = Grid::new(spec)?;

    // one channel in, one matrix out
    let mut matrices = grid.evaluate(points, &[channel], config, |_| {})?;
    Ok(matrices.swap_remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use tablecore::MeasurementPoint;

    fn flux_points(data: &[(f64, f64, f64)]) -> PointSet {
        PointSet::new(
            data.iter()
                .map(|&(x, y, v)| MeasurementPoint::new(x, y, BTreeMap::new()).with_channel("flux", v))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_grid_coordinates() {
        let grid = Grid::new(&GridSpec::new(3, 10.0).unwrap()).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.coordinate(0, 0), (0.0, 0.0));
        assert_eq!(grid.coordinate(1, 2), (5.0, 10.0));
        assert_eq!(grid.coordinate(2, 2), (10.0, 10.0));

        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], ((0, 0), (0.0, 0.0)));
        assert_eq!(cells[1], ((0, 1), (0.0, 5.0)));
        assert_eq!(cells[8], ((2, 2), (10.0, 10.0)));
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let spec = GridSpec { size: 1, max_current: 10.0 };
        assert_eq!(Grid::new(&spec).unwrap_err(), TableError::InvalidGridSize(1));
    }

    #[test]
    fn test_build_matrix_shape() {
        let points = flux_points(&[(0.0, 0.0, 1.0), (4.0, 4.0, 2.0)]);
        let spec = GridSpec::new(5, 4.0).unwrap();
        let m = build_matrix(&points, "flux", &spec, &InterpolationConfig::new(2.0).unwrap()).unwrap();
        assert_eq!(m.shape(), (5, 5));
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(4, 4)], 2.0);
    }

    #[test]
    fn test_matrix_rows_follow_x_axis() {
        // Value equals x at every point; with exact hits on the grid the
        // matrix must vary along rows only.
        let mut data = Vec::new();
        for x in [0.0, 1.0, 2.0] {
            for y in [0.0, 1.0, 2.0] {
                data.push((x, y, x));
            }
        }
        let points = flux_points(&data);
        let spec = GridSpec::new(3, 2.0).unwrap();
        let m = build_matrix(&points, "flux", &spec, &InterpolationConfig::new(0.5).unwrap()).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m[(i, j)], i as f64);
            }
        }
    }

    #[test]
    fn test_evaluate_reports_every_row() {
        let points = flux_points(&[(0.0, 0.0, 1.0)]);
        let grid = Grid::new(&GridSpec::new(6, 1.0).unwrap()).unwrap();
        let seen = Mutex::new(Vec::new());
        grid.evaluate(
            &points,
            &["flux"],
            &InterpolationConfig::new(1.0).unwrap(),
            |p| seen.lock().unwrap().push(p),
        )
        .unwrap();

        let mut seen = seen.into_inner().unwrap();
        seen.sort_by_key(|p| p.completed_rows);
        assert_eq!(seen.len(), 6);
        assert!(seen.iter().all(|p| p.total_rows == 6));
        assert_eq!(seen.last().unwrap().completed_rows, 6);
    }

    #[test]
    fn test_evaluate_multiple_channels() {
        let points = PointSet::new(vec![
            MeasurementPoint::new(0.0, 0.0, BTreeMap::new())
                .with_channel("a", 1.0)
                .with_channel("b", -1.0),
            MeasurementPoint::new(1.0, 1.0, BTreeMap::new())
                .with_channel("a", 3.0)
                .with_channel("b", -3.0),
        ])
        .unwrap();
        let grid = Grid::new(&GridSpec::new(2, 1.0).unwrap()).unwrap();
        let out = grid
            .evaluate(
                &points,
                &["a", "b"],
                &InterpolationConfig::new(10.0).unwrap(),
                |_| {},
            )
            .unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0][(0, 0)], 1.0);
        assert_eq!(out[1][(1, 1)], -3.0);
        // (0, 1) and (1, 0) are equidistant from both points
        assert!((out[0][(0, 1)] - 2.0).abs() < 1e-12);
        assert!((out[1][(1, 0)] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_point_set_fails() {
        let points = flux_points(&[]);
        let spec = GridSpec::new(3, 1.0).unwrap();
        let err = build_matrix(&points, "flux", &spec, &InterpolationConfig::new(1.0).unwrap()).unwrap_err();
        assert_eq!(err, TableError::EmptyPointSet);
    }
}
