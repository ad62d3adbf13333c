//! Multi-channel table generation

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use tablecore::{GridSpec, InterpolationConfig, PointSet, Result, TableError, TableSet};

use crate::grid::{Grid, GridProgress};

/// Generates one lookup table per channel over a shared grid.
///
/// Holds an immutable, validated configuration; every call is an independent
/// run.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGenerator {
    grid: GridSpec,
    config: InterpolationConfig,
}

impl TableGenerator {
    pub fn new(grid: GridSpec, config: InterpolationConfig) -> Result<Self> {
        grid.validate()?;
        config.validate()?;
        Ok(TableGenerator { grid, config })
    }

    pub fn grid_spec(&self) -> &GridSpec {
        &self.grid
    }

    pub fn config(&self) -> &InterpolationConfig {
        &self.config
    }

    /// Interpolate every requested channel.
    ///
    /// Fails as a whole if any requested channel is missing from the point
    /// set; nothing is computed in that case. Repeated channel names are
    /// computed once.
    pub fn generate<S: AsRef<str>>(&self, points: &PointSet, channels: &[S]) -> Result<TableSet> {
        self.generate_with_progress(points, channels, |_| {})
    }

    /// Like [`generate`](Self::generate), reporting each finished grid row.
    pub fn generate_with_progress<S, F>(
        &self,
        points: &PointSet,
        channels: &[S],
        progress: F,
    ) -> Result<TableSet>
    where
        S: AsRef<str>,
        F: Fn(GridProgress) + Sync,
    {
        if points.is_empty() {
            return Err(TableError::EmptyPointSet);
        }

        let requested: BTreeSet<&str> = channels.iter().map(|c| c.as_ref()).collect();
        if let Some(missing) = requested.iter().find(|c| !points.has_channel(c)) {
            return Err(TableError::ChannelNotFound(missing.to_string()));
        }
        let requested: Vec<&str> = requested.into_iter().collect();

        let grid = Grid::new(&self.grid)?;
        debug!(
            "grid {}x{} over [0, {}] A, threshold {} A, channels {:?}",
            grid.size(),
            grid.size(),
            self.grid.max_current,
            self.config.distance_threshold,
            requested
        );
        info!(
            "Generating {} table(s) from {} points",
            requested.len(),
            points.len()
        );

        let matrices = grid.evaluate(points, &requested, &self.config, progress)?;
        let tables: BTreeMap<String, _> = requested
            .iter()
            .map(|c| c.to_string())
            .zip(matrices)
            .collect();

        for (name, table) in &tables {
            let (lo, hi) = table.range();
            debug!("{name}: [{lo:.6}, {hi:.6}]");
        }
        info!("Table generation complete");

        let axis = grid.axis().to_vec();
        Ok(TableSet::new(axis.clone(), axis, tables))
    }
}

/// One-shot table generation for the given channels.
pub fn generate_tables<S: AsRef<str>>(
    points: &PointSet,
    grid: &GridSpec,
    config: &InterpolationConfig,
    channels: &[S],
) -> Result<TableSet> {
    TableGenerator::new(*grid, *config)?.generate(points, channels)
}
