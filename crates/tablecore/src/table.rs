//! Generated lookup tables

use std::collections::BTreeMap;
use std::ops::Index;

use ndarray::Array2;

/// Interpolated values of one channel over a square grid.
///
/// Entry `[(i, j)]` is the value at grid coordinate `(x_i, y_j)`: rows follow
/// the Id axis and columns the Iq axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMatrix {
    values: Array2<f64>,
}

impl ResultMatrix {
    pub fn from_array(values: Array2<f64>) -> Self {
        ResultMatrix { values }
    }

    /// Number of samples per axis
    pub fn size(&self) -> usize {
        self.values.nrows()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get((i, j)).copied()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn into_array(self) -> Array2<f64> {
        self.values
    }

    /// Row-major copy, `rows[i][j]` at `(x_i, y_j)`
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    /// Smallest and largest entry
    pub fn range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

impl Index<(usize, usize)> for ResultMatrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.values[[index.0, index.1]]
    }
}

/// All channel matrices of one run, sharing one pair of axes
#[derive(Debug, Clone, PartialEq)]
pub struct TableSet {
    id_axis: Vec<f64>,
    iq_axis: Vec<f64>,
    tables: BTreeMap<String, ResultMatrix>,
}

impl TableSet {
    pub fn new(id_axis: Vec<f64>, iq_axis: Vec<f64>, tables: BTreeMap<String, ResultMatrix>) -> Self {
        TableSet { id_axis, iq_axis, tables }
    }

    /// Direct-axis current samples (matrix rows)
    pub fn id_axis(&self) -> &[f64] {
        &self.id_axis
    }

    /// Quadrature-axis current samples (matrix columns)
    pub fn iq_axis(&self) -> &[f64] {
        &self.iq_axis
    }

    /// Grid coordinate of cell `(i, j)`
    pub fn coordinate(&self, i: usize, j: usize) -> Option<(f64, f64)> {
        Some((*self.id_axis.get(i)?, *self.iq_axis.get(j)?))
    }

    pub fn get(&self, channel: &str) -> Option<&ResultMatrix> {
        self.tables.get(channel)
    }

    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn tables(&self) -> &BTreeMap<String, ResultMatrix> {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn into_tables(self) -> BTreeMap<String, ResultMatrix> {
        self.tables
    }
}
