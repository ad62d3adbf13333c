//! Inverse distance weighting engine for (Id, Iq) lookup tables
//!
//! Turns a scattered set of measured operating points into dense square
//! tables, one per value channel:
//! - [`distance`]: Euclidean distance from a target to every point
//! - [`neighbors`]: threshold selection and nearest-point lookup
//! - [`weights`]: per-cell IDW weights with exact-match and nearest fallback
//! - [`grid`]: grid construction and parallel per-cell evaluation
//! - [`tables`]: multi-channel orchestration

pub mod distance;
pub mod grid;
pub mod neighbors;
pub mod tables;
pub mod weights;

pub use distance::{PointDistance, distances};
pub use grid::{Grid, GridProgress, build_matrix};
pub use neighbors::{Neighborhood, nearest, select_neighbors};
pub use tables::{TableGenerator, generate_tables};
pub use weights::{CellWeights, interpolate};
