//! Measured operating points in the (Id, Iq) plane

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// One measured operating condition.
///
/// `x` is the direct-axis current, `y` the quadrature-axis current, and
/// `channels` holds the derived quantities (flux linkage, inductance, ...)
/// measured at that location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    pub x: f64,
    pub y: f64,
    pub channels: BTreeMap<String, f64>,
}

impl MeasurementPoint {
    pub fn new(x: f64, y: f64, channels: BTreeMap<String, f64>) -> Self {
        MeasurementPoint { x, y, channels }
    }

    /// Add or replace a channel value
    pub fn with_channel(mut self, name: impl Into<String>, value: f64) -> Self {
        self.channels.insert(name.into(), value);
        self
    }

    pub fn channel(&self, name: &str) -> Option<f64> {
        self.channels.get(name).copied()
    }

    /// Euclidean distance from this point to `(tx, ty)`
    #[inline]
    pub fn distance_to(&self, tx: f64, ty: f64) -> f64 {
        (self.x - tx).hypot(self.y - ty)
    }
}

/// Axis-aligned bounding box of a point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }
}

/// Read-only collection of measurement points sharing one channel set.
///
/// Construction enforces that every point exposes exactly the same channel
/// names and that all coordinates and values are finite. Duplicate
/// coordinates are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<MeasurementPoint>,
    channels: BTreeSet<String>,
}

impl PointSet {
    pub fn new(points: Vec<MeasurementPoint>) -> Result<Self> {
        let channels: BTreeSet<String> = points
            .first()
            .map(|p| p.channels.keys().cloned().collect())
            .unwrap_or_default();

        for (index, point) in points.iter().enumerate() {
            if !point.x.is_finite() {
                return Err(TableError::NonFiniteValue { index, field: "x".into() });
            }
            if !point.y.is_finite() {
                return Err(TableError::NonFiniteValue { index, field: "y".into() });
            }

            let same_keys = point.channels.len() == channels.len()
                && point.channels.keys().all(|k| channels.contains(k));
            if !same_keys {
                return Err(TableError::InconsistentChannels {
                    index,
                    expected: channels.iter().cloned().collect(),
                    found: point.channels.keys().cloned().collect(),
                });
            }

            if let Some((name, _)) = point.channels.iter().find(|(_, v)| !v.is_finite()) {
                return Err(TableError::NonFiniteValue {
                    index,
                    field: format!("channel `{name}`"),
                });
            }
        }

        Ok(PointSet { points, channels })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[MeasurementPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeasurementPoint> {
        self.points.iter()
    }

    /// Channel names present on every point, in sorted order
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(String::as_str)
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.channels.contains(name)
    }

    /// Values of one channel, indexed like `points()`.
    pub fn channel_values(&self, name: &str) -> Result<Vec<f64>> {
        if !self.has_channel(name) {
            return Err(TableError::ChannelNotFound(name.to_string()));
        }
        // Every point carries the channel once construction succeeded.
        Ok(self
            .points
            .iter()
            .filter_map(|p| p.channel(name))
            .collect())
    }

    /// Bounding box of the point coordinates, `None` when empty
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.points.first()?;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(self.points.iter().fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a MeasurementPoint;
    type IntoIter = std::slice::Iter<'a, MeasurementPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
