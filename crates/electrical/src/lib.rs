//! Motor measurement processing
//!
//! Converts raw d-q test bench records into flux linkage, torque and
//! inductance points ready for table generation.

pub mod calculations;
pub mod error;
pub mod motor;
pub mod processing;

pub use error::{ProcessingError, Result};
pub use motor::MotorParameters;
pub use processing::{
    MeasurementRecord, ProcessedRecord, build_point_set, channels, process_records, to_point_set,
};
