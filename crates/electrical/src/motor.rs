use serde::{Deserialize, Serialize};

use crate::calculations::ke_to_psi;
use crate::error::{ProcessingError, Result};

/// Machine constants needed to turn raw d-q measurements into flux linkage,
/// torque and inductance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorParameters {
    pub pole_pairs: u32,
    /// Stator phase resistance (Ohm)
    pub stator_resistance: f64,
    /// Permanent magnet flux linkage (Wb-turns)
    #[serde(default)]
    pub flux_linkage_pm: f64,
}

impl MotorParameters {
    pub fn new(pole_pairs: u32, stator_resistance: f64, flux_linkage_pm: f64) -> Result<Self> {
        let params = MotorParameters {
            pole_pairs,
            stator_resistance,
            flux_linkage_pm,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build from a back-EMF constant given in V_rms,LL per krpm.
    pub fn from_back_emf_constant(pole_pairs: u32, stator_resistance: f64, ke_v_krpm: f64) -> Result<Self> {
        Self::new(pole_pairs, stator_resistance, ke_to_psi(ke_v_krpm, pole_pairs))
    }

    pub fn validate(&self) -> Result<()> {
        if self.pole_pairs == 0 {
            return Err(ProcessingError::InvalidMotorParameter {
                name: "pole_pairs",
                value: self.pole_pairs as f64,
            });
        }
        if !(self.stator_resistance.is_finite() && self.stator_resistance >= 0.0) {
            return Err(ProcessingError::InvalidMotorParameter {
                name: "stator_resistance",
                value: self.stator_resistance,
            });
        }
        if !self.flux_linkage_pm.is_finite() {
            return Err(ProcessingError::InvalidMotorParameter {
                name: "flux_linkage_pm",
                value: self.flux_linkage_pm,
            });
        }
        Ok(())
    }
}
