//! Compliance calculators.
//!
//! - [`fueleu`] - FuelEU Maritime GHG intensity, balance, penalty, RFNBO and OPS
//! - [`trading`] - EU ETS and UK ETS allowance requirements and cost
//! - [`imo`] - IMO Net-Zero Framework GHG Fuel Intensity and remedial cost
//! - [`constants`] - Fixed calculator parameters (in-force dates, thresholds)
//!
//! Calculators are pure: they read the registry and the fuel lookup, never
//! mutate either, and return a self-describing result. Two calls with the
//! same inputs and the same registry snapshot return identical results.

pub mod constants;
pub mod fueleu;
pub mod imo;
pub mod trading;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::period::ReportingPeriod;

pub use fueleu::{FuelEuCalculator, FuelEuResult, OpsAssessment, OpsPort, OpsSession};
pub use imo::{GfiTarget, GfiTargetKind, ImoCalculator, ImoResult, Tier};
pub use trading::{
    Currency, PhaseInSource, PriceSource, TradingCalculator, TradingResult, TradingScheme,
};

/// Whether a framework's obligations apply to a reporting period.
///
/// Results for periods before a framework starts are all-zero and tagged
/// `NotInForce`, so "not yet applicable" is distinguishable from a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Applicability {
    InForce,
    NotInForce { effective_from: NaiveDate },
}

impl Applicability {
    pub(crate) fn for_period(period: &ReportingPeriod, effective_from: NaiveDate) -> Self {
        if period.covers(effective_from) {
            Applicability::InForce
        } else {
            Applicability::NotInForce { effective_from }
        }
    }

    pub fn is_in_force(&self) -> bool {
        matches!(self, Applicability::InForce)
    }
}

/// Reject coverage coefficients outside `[0, 1]`.
pub(crate) fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidInput {
            message: format!("{name} must be between 0 and 1, got {value}"),
        });
    }
    Ok(())
}

/// Reject negative or non-finite caller-supplied amounts.
pub(crate) fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidInput {
            message: format!("{name} must be finite and non-negative, got {value}"),
        });
    }
    Ok(())
}
