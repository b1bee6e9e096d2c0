//! Locating and loading the reference data a command needs.
//!
//! Each source is taken from, in order: the command-line flag, the
//! environment variable, the table built into the library.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use seacomply_lib::{ConstantRegistry, FleetYear, FuelCatalog};
use tracing::debug;

pub const CONSTANTS_ENV: &str = "SEACOMPLY_CONSTANTS";
pub const FUELS_ENV: &str = "SEACOMPLY_FUELS";

/// Pick the explicit path, else the path named by `env_var`.
fn source_path(explicit: Option<&Path>, env_var: &str) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(env_var).map(PathBuf::from))
}

pub fn load_registry(explicit: Option<&Path>) -> Result<ConstantRegistry> {
    match source_path(explicit, CONSTANTS_ENV) {
        Some(path) => ConstantRegistry::from_path(&path)
            .with_context(|| format!("failed to load constants from {}", path.display())),
        None => {
            debug!("using built-in regulatory constants");
            ConstantRegistry::builtin().context("built-in regulatory constants are invalid")
        }
    }
}

pub fn load_fuels(explicit: Option<&Path>) -> Result<FuelCatalog> {
    match source_path(explicit, FUELS_ENV) {
        Some(path) => FuelCatalog::from_path(&path)
            .with_context(|| format!("failed to load fuel catalog from {}", path.display())),
        None => {
            debug!("using built-in fuel catalog");
            FuelCatalog::builtin().context("built-in fuel catalog is invalid")
        }
    }
}

/// Read a fleet-year request from a JSON file.
pub fn load_fleet(path: &Path) -> Result<FleetYear> {
    let file = File::open(path)
        .with_context(|| format!("failed to open request file {}", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("failed to parse request file {}", path.display()))
}
