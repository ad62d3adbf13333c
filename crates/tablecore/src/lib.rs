//! Core data model for lookup-table generation
//!
//! Measured operating points, grid and interpolation configuration, the
//! generated tables, and the shared error type.

pub mod error;
pub mod grid;
pub mod point;
pub mod table;

pub use error::{Result, TableError};
pub use grid::{GridSpec, InterpolationConfig};
pub use point::{Bounds, MeasurementPoint, PointSet};
pub use table::{ResultMatrix, TableSet};
