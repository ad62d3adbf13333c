mod config;
mod error;
mod export;
mod loader;

use std::path::{Path, PathBuf};

use electrical::build_point_set;
use interpolation::TableGenerator;
use log::{LevelFilter, SetLoggerError, error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::error::Result;
use crate::export::TableExport;

/// Load, process, tabulate and export according to `config`.
fn run(config: &AppConfig) -> Result<()> {
    let motor = config.motor.parameters()?;
    let grid = config.table.grid_spec()?;

    let records = loader::load_records(&config.data.csv_path, &config.data.columns)?;
    let points = build_point_set(&records, &motor)?;

    let interpolation = config.table.interpolation_config(&points)?;
    info!(
        "{} points, {}x{} grid up to {} A, distance threshold {:.3} A",
        points.len(),
        grid.size,
        grid.size,
        grid.max_current,
        interpolation.distance_threshold
    );

    let generator = TableGenerator::new(grid, interpolation)?;
    let channels = config.table.channels();
    let step = (grid.size / 10).max(1);
    let tables = generator.generate_with_progress(&points, channels.as_slice(), |p| {
        if p.completed_rows % step == 0 || p.completed_rows == p.total_rows {
            info!("rows {}/{}", p.completed_rows, p.total_rows);
        }
    })?;

    TableExport::new(&tables, &grid, &interpolation).save(&config.output.path)
}

fn init_logger(level: LevelFilter) -> std::result::Result<(), SetLoggerError> {
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)
}

/// Read the configuration and its log level.
fn load_config(path: &Path) -> Result<(AppConfig, LevelFilter)> {
    let config = AppConfig::load(path)?;
    let level = config.level_filter()?;
    Ok((config, level))
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = match load_config(&config_path) {
        Ok((config, level)) => {
            init_logger(level)?;
            config
        }
        Err(e) => {
            // no usable level yet
            init_logger(LevelFilter::Info)?;
            error!("{}: {e}", config_path.display());
            return Err(e.into());
        }
    };
    info!("Using configuration {}", config_path.display());

    if let Err(e) = run(&config) {
        error!("{e}");
        return Err(e.into());
    }
    Ok(())
}
