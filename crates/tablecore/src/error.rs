//! Error types shared by the table generation crates

use thiserror::Error;

/// Failure conditions of point-set construction and table generation.
///
/// None of these are transient: retrying with identical inputs fails
/// identically.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("grid size must be at least 2, got {0}")]
    InvalidGridSize(usize),

    #[error("max current must be positive and finite, got {0}")]
    InvalidMaxCurrent(f64),

    #[error("distance threshold must be positive and finite, got {0}")]
    InvalidDistanceThreshold(f64),

    #[error("point set is empty")]
    EmptyPointSet,

    #[error("channel `{0}` not found in point set")]
    ChannelNotFound(String),

    #[error("point {index} has channels {found:?}, expected {expected:?}")]
    InconsistentChannels {
        index: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("point {index} has a non-finite {field}")]
    NonFiniteValue { index: usize, field: String },
}

/// Result type alias for table generation
pub type Result<T> = std::result::Result<T, TableError>;
