//! Typed payloads carried by regulatory constants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reduction target for one FuelEU reporting year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelEuTarget {
    /// Fractional reduction against the 2020 reference intensity.
    pub reduction: f64,
    /// Target GHG intensity in gCO2e/MJ.
    pub target_intensity: f64,
}

/// One IMO GHG Fuel Intensity milestone (2030, 2040, 2050).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GfiMilestone {
    /// Minimum (or, for 2050, net-zero) reduction fraction.
    pub reduction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspirational: Option<f64>,
    /// Target GFI in gCO2e/MJ.
    pub target_gfi: f64,
}

/// Global Warming Potential weights (tonnes CO2e per tonne of gas).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GwpValues {
    pub co2: f64,
    pub ch4: f64,
    pub n2o: f64,
}

impl GwpValues {
    /// Weights for periods where only CO2 is reported.
    pub fn co2_only() -> Self {
        Self {
            co2: 1.0,
            ch4: 0.0,
            n2o: 0.0,
        }
    }
}

/// Published auction price band for an allowance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve: Option<f64>,
}

impl PriceRange {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Value of a regulatory constant.
///
/// Serialized externally tagged, e.g. `{"scalar": 58.5}` or
/// `{"year_table": {"2024": 0.4, "2025": 0.7}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantValue {
    Scalar(f64),
    Text(String),
    YearTable(BTreeMap<i32, f64>),
    FuelEuTargets(BTreeMap<i32, FuelEuTarget>),
    GfiTargets(BTreeMap<i32, GfiMilestone>),
    Gwp(GwpValues),
    PriceRange(PriceRange),
    Coverage(BTreeMap<String, f64>),
}

impl ConstantValue {
    /// Short name of the variant, used in type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ConstantValue::Scalar(_) => "scalar",
            ConstantValue::Text(_) => "text",
            ConstantValue::YearTable(_) => "year_table",
            ConstantValue::FuelEuTargets(_) => "fuel_eu_targets",
            ConstantValue::GfiTargets(_) => "gfi_targets",
            ConstantValue::Gwp(_) => "gwp",
            ConstantValue::PriceRange(_) => "price_range",
            ConstantValue::Coverage(_) => "coverage",
        }
    }
}
