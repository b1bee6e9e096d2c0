//! Consumption records and per-record factor resolution.
//!
//! A record names a fuel and a burned mass, optionally overriding the fuel's
//! default factors with values certified on the bunker delivery note. Every
//! calculator resolves records through [`resolve_records`], which falls back to
//! catalog defaults for absent overrides and reports records whose fuel is
//! unknown instead of failing the whole calculation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::energy::energy_from_mass;
use crate::error::{Error, Result};

use super::{Fuel, FuelLookup};

/// One fuel-burn event attributable to a voyage or reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub fuel_id: String,
    pub mass_tonnes: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcv_mj_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_factor_t: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ch4_factor_t: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n2o_factor_t: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wtt_gco2e_mj: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttw_gco2e_mj: Option<f64>,
    /// Certified Well-to-Wake intensity; defaults to WtT + TtW.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wtw_gco2e_mj: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methane_slip_pct: Option<f64>,
    #[serde(default)]
    pub is_rfnbo: bool,
}

impl ConsumptionRecord {
    /// Record with catalog defaults for every factor.
    pub fn new(fuel_id: impl Into<String>, mass_tonnes: f64) -> Self {
        Self {
            fuel_id: fuel_id.into(),
            mass_tonnes,
            ..Self::default()
        }
    }

    fn validate(&self, index: usize) -> Result<()> {
        let invalid = |message: String| Error::InvalidConsumption { index, message };

        if !self.mass_tonnes.is_finite() || self.mass_tonnes < 0.0 {
            return Err(invalid(format!(
                "mass_tonnes must be finite and non-negative, got {}",
                self.mass_tonnes
            )));
        }

        if let Some(lcv) = self.lcv_mj_kg {
            if !lcv.is_finite() || lcv <= 0.0 {
                return Err(invalid(format!(
                    "lcv_mj_kg must be finite and positive, got {lcv}"
                )));
            }
        }

        let overrides = [
            (self.co2_factor_t, "co2_factor_t"),
            (self.ch4_factor_t, "ch4_factor_t"),
            (self.n2o_factor_t, "n2o_factor_t"),
            (self.wtt_gco2e_mj, "wtt_gco2e_mj"),
            (self.ttw_gco2e_mj, "ttw_gco2e_mj"),
            (self.wtw_gco2e_mj, "wtw_gco2e_mj"),
        ];
        for (value, field) in overrides {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(invalid(format!(
                        "{field} must be finite and non-negative, got {v}"
                    )));
                }
            }
        }

        if let Some(slip) = self.methane_slip_pct {
            if !(0.0..=100.0).contains(&slip) {
                return Err(invalid(format!(
                    "methane_slip_pct must be between 0 and 100, got {slip}"
                )));
            }
        }

        Ok(())
    }

    fn resolve(&self, index: usize, fuel: &Fuel) -> ResolvedRecord {
        let lcv_mj_kg = self.lcv_mj_kg.unwrap_or(fuel.lcv_mj_kg);
        let wtt_gco2e_mj = self.wtt_gco2e_mj.unwrap_or(fuel.wtt_gco2e_mj);
        let ttw_gco2e_mj = self.ttw_gco2e_mj.unwrap_or(fuel.ttw_gco2e_mj);

        ResolvedRecord {
            index,
            fuel_id: self.fuel_id.clone(),
            mass_tonnes: self.mass_tonnes,
            lcv_mj_kg,
            energy_gj: energy_from_mass(self.mass_tonnes, lcv_mj_kg),
            co2_factor_t: self.co2_factor_t.unwrap_or(fuel.co2_factor_t),
            ch4_factor_t: self.ch4_factor_t.unwrap_or(fuel.ch4_factor_t),
            n2o_factor_t: self.n2o_factor_t.unwrap_or(fuel.n2o_factor_t),
            wtt_gco2e_mj,
            ttw_gco2e_mj,
            wtw_gco2e_mj: self.wtw_gco2e_mj.unwrap_or(wtt_gco2e_mj + ttw_gco2e_mj),
            methane_slip_pct: self.methane_slip_pct.unwrap_or(0.0),
            is_rfnbo: self.is_rfnbo,
        }
    }
}

/// A record with every factor settled (override or fuel default).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecord {
    /// Position of the record in the caller's input.
    pub index: usize,
    pub fuel_id: String,
    pub mass_tonnes: f64,
    pub lcv_mj_kg: f64,
    pub energy_gj: f64,
    pub co2_factor_t: f64,
    pub ch4_factor_t: f64,
    pub n2o_factor_t: f64,
    pub wtt_gco2e_mj: f64,
    pub ttw_gco2e_mj: f64,
    pub wtw_gco2e_mj: f64,
    pub methane_slip_pct: f64,
    pub is_rfnbo: bool,
}

/// Why a record did not contribute to a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The record's fuel id is not in the fuel lookup.
    UnknownFuel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordStatus {
    Included,
    Skipped { reason: SkipReason },
}

/// Per-record audit entry carried on every calculation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub index: usize,
    pub fuel_id: String,
    pub status: RecordStatus,
}

impl RecordOutcome {
    pub fn is_included(&self) -> bool {
        matches!(self.status, RecordStatus::Included)
    }
}

/// Records that resolved against the fuel lookup, plus an outcome for every
/// input record in input order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRecords {
    pub included: Vec<ResolvedRecord>,
    pub outcomes: Vec<RecordOutcome>,
}

impl ResolvedRecords {
    pub fn total_energy_gj(&self) -> f64 {
        self.included.iter().map(|r| r.energy_gj).sum()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_included()).count()
    }
}

/// Resolve every record against `fuels`.
///
/// Records whose fuel is unknown are skipped and reported; records carrying
/// invalid numbers abort with [`Error::InvalidConsumption`].
pub fn resolve_records<L>(records: &[ConsumptionRecord], fuels: &L) -> Result<ResolvedRecords>
where
    L: FuelLookup + ?Sized,
{
    let mut resolved = ResolvedRecords {
        included: Vec::with_capacity(records.len()),
        outcomes: Vec::with_capacity(records.len()),
    };

    for (index, record) in records.iter().enumerate() {
        record.validate(index)?;

        let status = match fuels.fuel(&record.fuel_id) {
            Some(fuel) => {
                resolved.included.push(record.resolve(index, fuel));
                RecordStatus::Included
            }
            None => {
                warn!(
                    index,
                    fuel_id = %record.fuel_id,
                    "skipping consumption record with unknown fuel"
                );
                RecordStatus::Skipped {
                    reason: SkipReason::UnknownFuel,
                }
            }
        };

        resolved.outcomes.push(RecordOutcome {
            index,
            fuel_id: record.fuel_id.clone(),
            status,
        });
    }

    Ok(resolved)
}
