//! Raw measurement records to interpolation-ready points
//!
//! Each record is one steady-state operating point of a motor test. From the
//! measured d-q voltages and currents and the machine constants, the
//! flux linkages, electromagnetic torque and apparent inductances are derived
//! and attached as channels at `(x, y) = (Id, Iq)`.

use std::collections::BTreeMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tablecore::{MeasurementPoint, PointSet};

use crate::calculations::{
    electrical_frequency, flux_linkage_d_voltage, flux_linkage_q_voltage, inductance_d, inductance_q,
    peak_to_rms, torque_flux,
};
use crate::error::{ProcessingError, Result};
use crate::motor::MotorParameters;

/// Channel names attached to every processed point
pub mod channels {
    pub const PSI_D: &str = "psi_d";
    pub const PSI_Q: &str = "psi_q";
    pub const TORQUE_EM: &str = "torque_em";
    pub const LD: &str = "ld";
    pub const LQ: &str = "lq";

    pub const FLUX: [&str; 2] = [PSI_D, PSI_Q];
    pub const INDUCTANCE: [&str; 2] = [LD, LQ];
}

/// One raw measurement row. Voltages and currents are peak values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub time_s: f64,
    pub speed_rpm: f64,
    pub torque_nm: f64,
    pub voltage_d: f64,
    pub voltage_q: f64,
    pub current_d: f64,
    pub current_q: f64,
}

/// A measurement record with its derived quantities
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProcessedRecord {
    pub raw: MeasurementRecord,
    /// rad/s
    pub electrical_frequency: f64,
    pub psi_d: f64,
    pub psi_q: f64,
    pub torque_em: f64,
    pub ld: f64,
    pub lq: f64,
    pub current_d_rms: f64,
    pub current_q_rms: f64,
    pub voltage_d_rms: f64,
    pub voltage_q_rms: f64,
}

impl ProcessedRecord {
    /// Derive all quantities for one record.
    ///
    /// Returns `None` at zero electrical speed or when any derived value is
    /// not finite.
    pub fn from_record(raw: &MeasurementRecord, params: &MotorParameters) -> Option<Self> {
        let omega_e = electrical_frequency(raw.speed_rpm, params.pole_pairs);
        if omega_e == 0.0 {
            return None;
        }
        let rs = params.stator_resistance;

        let psi_d = flux_linkage_d_voltage(raw.voltage_q, raw.current_q, omega_e, rs);
        let psi_q = flux_linkage_q_voltage(raw.voltage_d, raw.current_d, omega_e, rs);

        let processed = ProcessedRecord {
            raw: *raw,
            electrical_frequency: omega_e,
            psi_d,
            psi_q,
            torque_em: torque_flux(psi_d, psi_q, raw.current_q, raw.current_d, params.pole_pairs),
            ld: inductance_d(psi_d, raw.current_d, params.flux_linkage_pm),
            lq: inductance_q(psi_q, raw.current_q),
            current_d_rms: peak_to_rms(raw.current_d),
            current_q_rms: peak_to_rms(raw.current_q),
            voltage_d_rms: peak_to_rms(raw.voltage_d),
            voltage_q_rms: peak_to_rms(raw.voltage_q),
        };

        processed.is_finite().then_some(processed)
    }

    fn is_finite(&self) -> bool {
        [
            self.raw.current_d,
            self.raw.current_q,
            self.psi_d,
            self.psi_q,
            self.torque_em,
            self.ld,
            self.lq,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// The record as a point at `(Id, Iq)` carrying every derived channel
    pub fn to_point(&self) -> MeasurementPoint {
        let channels = BTreeMap::from([
            (channels::PSI_D.to_string(), self.psi_d),
            (channels::PSI_Q.to_string(), self.psi_q),
            (channels::TORQUE_EM.to_string(), self.torque_em),
            (channels::LD.to_string(), self.ld),
            (channels::LQ.to_string(), self.lq),
        ]);
        MeasurementPoint::new(self.raw.current_d, self.raw.current_q, channels)
    }
}

/// Derive quantities for every usable record.
///
/// Records at standstill or with non-finite results are dropped; failing
/// only when none remain.
pub fn process_records(records: &[MeasurementRecord], params: &MotorParameters) -> Result<Vec<ProcessedRecord>> {
    params.validate()?;

    let processed: Vec<ProcessedRecord> = records
        .iter()
        .filter_map(|r| ProcessedRecord::from_record(r, params))
        .collect();

    let dropped = records.len() - processed.len();
    if dropped > 0 {
        warn!(
            "Dropped {dropped} of {} records (zero electrical speed or non-finite result)",
            records.len()
        );
    }
    if processed.is_empty() {
        return Err(ProcessingError::NoUsableRecords { dropped });
    }

    info!("Processed {} measurement records", processed.len());
    Ok(processed)
}

pub fn to_point_set(processed: &[ProcessedRecord]) -> Result<PointSet> {
    Ok(PointSet::new(processed.iter().map(ProcessedRecord::to_point).collect())?)
}

/// Process raw records and convert them to a point set in one step.
pub fn build_point_set(records: &[MeasurementRecord], params: &MotorParameters) -> Result<PointSet> {
    to_point_set(&process_records(records, params)?)
}
