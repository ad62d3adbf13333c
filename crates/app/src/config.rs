//! JSON run configuration for the `tablegen` binary

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use electrical::{MotorParameters, channels};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use tablecore::{GridSpec, InterpolationConfig, PointSet};

use crate::error::{AppError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config/tablegen.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub motor: MotorConfig,
    pub table: TableConfig,
    pub output: OutputConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub csv_path: PathBuf,
    #[serde(default)]
    pub columns: ColumnNames,
}

/// Header names of the measurement columns in the raw CSV file.
/// Voltages and currents are peak values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub time: String,
    pub speed: String,
    pub torque: String,
    pub voltage_d: String,
    pub voltage_q: String,
    pub current_d: String,
    pub current_q: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            time: "time_s".into(),
            speed: "speed_rpm".into(),
            torque: "torque_nm".into(),
            voltage_d: "ud".into(),
            voltage_q: "uq".into(),
            current_d: "id".into(),
            current_q: "iq".into(),
        }
    }
}

/// Either `flux_linkage_pm` (Wb-turns) or `back_emf_constant`
/// (V_rms,LL / krpm) must be given, not both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorConfig {
    pub pole_pairs: u32,
    pub stator_resistance: f64,
    #[serde(default)]
    pub flux_linkage_pm: Option<f64>,
    #[serde(default)]
    pub back_emf_constant: Option<f64>,
}

impl MotorConfig {
    pub fn parameters(&self) -> Result<MotorParameters> {
        let params = match (self.flux_linkage_pm, self.back_emf_constant) {
            (Some(psi), None) => MotorParameters::new(self.pole_pairs, self.stator_resistance, psi)?,
            (None, Some(ke)) => {
                MotorParameters::from_back_emf_constant(self.pole_pairs, self.stator_resistance, ke)?
            }
            (Some(_), Some(_)) => {
                return Err(AppError::Config(
                    "motor: give flux_linkage_pm or back_emf_constant, not both".into(),
                ));
            }
            (None, None) => {
                return Err(AppError::Config(
                    "motor: flux_linkage_pm or back_emf_constant is required".into(),
                ));
            }
        };
        Ok(params)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub size: usize,
    pub max_current_a: f64,
    /// Derived from the measured point spread when absent
    #[serde(default)]
    pub distance_threshold: Option<f64>,
    #[serde(default)]
    pub include_inductance: bool,
}

impl TableConfig {
    pub fn grid_spec(&self) -> Result<GridSpec> {
        Ok(GridSpec::new(self.size, self.max_current_a)?)
    }

    pub fn interpolation_config(&self, points: &PointSet) -> Result<InterpolationConfig> {
        let config = match self.distance_threshold {
            Some(threshold) => InterpolationConfig::new(threshold)?,
            None => InterpolationConfig::from_point_spread(points)?,
        };
        Ok(config)
    }

    pub fn channels(&self) -> Vec<&'static str> {
        let mut requested = channels::FLUX.to_vec();
        if self.include_inductance {
            requested.extend(channels::INDUCTANCE);
        }
        requested
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| AppError::Config(format!("unknown log level '{}'", self.log_level)))
    }
}
