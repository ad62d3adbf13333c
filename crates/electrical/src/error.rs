//! Error types for measurement processing

use tablecore::TableError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("invalid motor parameter: {name} = {value}")]
    InvalidMotorParameter { name: &'static str, value: f64 },

    #[error("no usable measurement records ({dropped} dropped)")]
    NoUsableRecords { dropped: usize },

    #[error(transparent)]
    Table(#[from] TableError),
}

pub type Result<T> = std::result::Result<T, ProcessingError>;
