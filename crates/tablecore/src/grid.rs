//! Grid and interpolation configuration

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::point::PointSet;

/// Square output grid over `[0, max_current] x [0, max_current]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Samples per axis, endpoints included
    pub size: usize,
    /// Upper end of both current axes (A)
    pub max_current: f64,
}

impl GridSpec {
    pub fn new(size: usize, max_current: f64) -> Result<Self> {
        let spec = GridSpec { size, max_current };
        spec.validate()?;
        Ok(spec)
    }

    /// Check `size >= 2` and `max_current > 0`.
    ///
    /// Fields are public (and deserializable), so consumers re-check before
    /// computing.
    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(TableError::InvalidGridSize(self.size));
        }
        if !(self.max_current.is_finite() && self.max_current > 0.0) {
            return Err(TableError::InvalidMaxCurrent(self.max_current));
        }
        Ok(())
    }

    /// Distance between neighboring samples on one axis
    pub fn spacing(&self) -> f64 {
        self.max_current / (self.size - 1) as f64
    }

    /// Linearly spaced axis samples from 0 to `max_current` inclusive.
    ///
    /// The endpoints are exact: the first sample is `0.0` and the last is
    /// `max_current` itself, not a rounded product.
    pub fn axis(&self) -> Vec<f64> {
        let last = self.size.saturating_sub(1);
        (0..self.size)
            .map(|i| {
                if i == last {
                    self.max_current
                } else {
                    self.max_current * i as f64 / last as f64
                }
            })
            .collect()
    }
}

/// Neighbor inclusion policy for the IDW engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolationConfig {
    /// Points farther than this from a grid cell do not contribute to its
    /// weighted average (A)
    pub distance_threshold: f64,
}

impl InterpolationConfig {
    pub fn new(distance_threshold: f64) -> Result<Self> {
        let config = InterpolationConfig { distance_threshold };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.distance_threshold.is_finite() && self.distance_threshold > 0.0) {
            return Err(TableError::InvalidDistanceThreshold(self.distance_threshold));
        }
        Ok(())
    }

    /// Threshold of half the diagonal of the points' bounding box.
    pub fn from_point_spread(points: &PointSet) -> Result<Self> {
        let bounds = points.bounds().ok_or(TableError::EmptyPointSet)?;
        Self::new(bounds.diagonal() / 2.0)
    }
}
