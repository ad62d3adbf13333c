//! JSON export of generated tables

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use serde::Serialize;
use tablecore::{GridSpec, InterpolationConfig, TableSet};

use crate::error::Result;

/// `tables[channel][i][j]` is the value at `(id_axis[i], iq_axis[j])`.
#[derive(Debug, Serialize)]
pub struct TableExport<'a> {
    pub size: usize,
    pub max_current_a: f64,
    pub distance_threshold: f64,
    pub id_axis: &'a [f64],
    pub iq_axis: &'a [f64],
    pub tables: BTreeMap<&'a str, Vec<Vec<f64>>>,
}

impl<'a> TableExport<'a> {
    pub fn new(tables: &'a TableSet, grid: &GridSpec, config: &InterpolationConfig) -> Self {
        TableExport {
            size: grid.size,
            max_current_a: grid.max_current,
            distance_threshold: config.distance_threshold,
            id_axis: tables.id_axis(),
            iq_axis: tables.iq_axis(),
            tables: tables
                .tables()
                .iter()
                .map(|(name, matrix)| (name.as_str(), matrix.to_rows()))
                .collect(),
        }
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write to `path`, creating missing parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        info!("Wrote {} table(s) to {}", self.tables.len(), path.display());
        Ok(())
    }
}
