//! Fuel reference data and consumption records.
//!
//! - [`catalog`] - Fuel catalog loading and lookup
//! - [`consumption`] - Consumption records, per-record factor resolution and
//!   record outcomes

pub mod catalog;
pub mod consumption;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use catalog::FuelCatalog;
pub use consumption::{
    ConsumptionRecord, RecordOutcome, RecordStatus, ResolvedRecord, ResolvedRecords, SkipReason,
};

/// Default properties of a fuel type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fuel {
    pub code: String,
    pub name: String,
    /// Lower calorific value in MJ/kg.
    pub lcv_mj_kg: f64,
    /// Tank-to-Wake intensity in gCO2e/MJ.
    pub ttw_gco2e_mj: f64,
    /// Well-to-Tank intensity in gCO2e/MJ.
    pub wtt_gco2e_mj: f64,
    /// Tonnes of CO2 per tonne of fuel burned.
    pub co2_factor_t: f64,
    /// Tonnes of CH4 per tonne of fuel burned.
    #[serde(default)]
    pub ch4_factor_t: f64,
    /// Tonnes of N2O per tonne of fuel burned.
    #[serde(default)]
    pub n2o_factor_t: f64,
}

impl Fuel {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(Error::FuelDataValidation {
                message: "fuel code must not be empty".to_string(),
            });
        }

        if !self.lcv_mj_kg.is_finite() || self.lcv_mj_kg <= 0.0 {
            return Err(Error::FuelDataValidation {
                message: format!("lcv_mj_kg for {} must be a finite positive number", self.code),
            });
        }

        let factors = [
            (self.ttw_gco2e_mj, "ttw_gco2e_mj"),
            (self.wtt_gco2e_mj, "wtt_gco2e_mj"),
            (self.co2_factor_t, "co2_factor_t"),
            (self.ch4_factor_t, "ch4_factor_t"),
            (self.n2o_factor_t, "n2o_factor_t"),
        ];

        for (value, field) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::FuelDataValidation {
                    message: format!(
                        "{field} for {} must be a finite non-negative number",
                        self.code
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Anything that can map a fuel identifier to its reference data.
pub trait FuelLookup {
    fn fuel(&self, id: &str) -> Option<&Fuel>;
}

impl FuelLookup for HashMap<String, Fuel> {
    fn fuel(&self, id: &str) -> Option<&Fuel> {
        self.get(id)
    }
}

impl<T: FuelLookup + ?Sized> FuelLookup for &T {
    fn fuel(&self, id: &str) -> Option<&Fuel> {
        (**self).fuel(id)
    }
}
