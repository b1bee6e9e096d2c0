#![allow(dead_code)]

use std::path::PathBuf;

use seacomply_lib::{ConstantRegistry, FuelCatalog};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// HFO (TtW 91.16, WtT 0), LNG and e-methanol.
pub fn fixture_fuels() -> FuelCatalog {
    FuelCatalog::from_path(&fixtures_dir().join("fuels.csv")).expect("load fixture fuels.csv")
}

pub fn builtin_registry() -> ConstantRegistry {
    ConstantRegistry::builtin().expect("builtin constants are valid")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
