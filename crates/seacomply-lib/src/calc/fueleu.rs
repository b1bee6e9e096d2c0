//! FuelEU Maritime calculator.
//!
//! Computes the energy-weighted GHG intensity of a vessel-year, compares it
//! with the target for the reporting year and prices any deficit. Also
//! reports the RFNBO reward and checks onshore power supply (OPS) obligations
//! at individual port calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::energy::{emissions_from_energy, intensity_from_emissions, GRAMS_PER_TONNE, MJ_PER_GJ};
use crate::error::{Error, Result};
use crate::fuel::consumption::resolve_records;
use crate::fuel::{ConsumptionRecord, FuelLookup, RecordOutcome};
use crate::period::ReportingPeriod;
use crate::registry::{keys, ConstantRegistry, FuelEuTarget};

use super::constants::{FUELEU_IN_FORCE_FROM, RFNBO_INCENTIVE_YEARS};
use super::{check_non_negative, Applicability};

/// FuelEU outcome for one vessel (or voyage) and reporting year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelEuResult {
    pub subject_id: String,
    pub year: i32,
    pub applicability: Applicability,
    pub total_energy_gj: f64,
    /// Well-to-Tank intensity component in gCO2e/MJ.
    pub wtt_intensity: f64,
    /// Tank-to-Wake intensity component (after methane slip) in gCO2e/MJ.
    pub ttw_intensity: f64,
    pub wind_factor: f64,
    pub attained_intensity: f64,
    pub target_intensity: f64,
    /// Year of the target row used; differs from `year` when the table has
    /// no row for it.
    pub target_year: Option<i32>,
    pub target_reduction: f64,
    /// Surplus (positive) or deficit (negative) in MJ-weighted gCO2e/MJ units.
    pub compliance_balance: f64,
    pub compliance_balance_t: f64,
    pub total_emissions_t: f64,
    pub penalty_eur: f64,
    pub rfnbo_energy_gj: f64,
    pub rfnbo_incentive: f64,
    pub records: Vec<RecordOutcome>,
    pub constants_fingerprint: String,
}

impl FuelEuResult {
    pub fn is_deficit(&self) -> bool {
        self.compliance_balance < 0.0
    }
}

/// Port at which a ship calls, as far as OPS obligations are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpsPort {
    pub port_code: String,
    pub mandatory_ops: bool,
}

/// Shore power actually drawn during a port call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpsSession {
    pub supplied_kwh: f64,
}

/// Outcome of an OPS check for a single port call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpsAssessment {
    pub year: i32,
    pub port_code: String,
    pub applicability: Applicability,
    pub mandatory: bool,
    pub required_kwh: f64,
    pub supplied_kwh: f64,
    pub shortfall_kwh: f64,
    pub compliant: bool,
    pub penalty_eur: f64,
}

/// FuelEU Maritime calculator bound to a constants snapshot.
#[derive(Debug, Clone, Copy)]
pub struct FuelEuCalculator<'a> {
    registry: &'a ConstantRegistry,
}

impl<'a> FuelEuCalculator<'a> {
    pub fn new(registry: &'a ConstantRegistry) -> Self {
        Self { registry }
    }

    /// Calculate GHG intensity, compliance balance, penalty and RFNBO reward.
    ///
    /// `wind_factor` of `None` uses the registry's wind-assist reward factor.
    ///
    /// # Errors
    /// [`Error::MissingConstant`] when the target table, penalty rate or
    /// wind factor is not loaded for the year; [`Error::InvalidConsumption`]
    /// or [`Error::InvalidInput`] for unusable inputs.
    pub fn calculate<L>(
        &self,
        subject_id: &str,
        year: i32,
        records: &[ConsumptionRecord],
        fuels: &L,
        wind_factor: Option<f64>,
    ) -> Result<FuelEuResult>
    where
        L: FuelLookup + ?Sized,
    {
        let period = ReportingPeriod::calendar_year(year)?;
        if let Some(w) = wind_factor {
            if !w.is_finite() || w <= 0.0 {
                return Err(Error::InvalidInput {
                    message: format!("wind_factor must be finite and positive, got {w}"),
                });
            }
        }

        let resolved = resolve_records(records, fuels)?;

        let applicability = Applicability::for_period(&period, FUELEU_IN_FORCE_FROM);
        if !applicability.is_in_force() {
            return Ok(self.not_in_force(
                subject_id,
                year,
                applicability,
                wind_factor.unwrap_or(1.0),
                resolved.outcomes,
            ));
        }

        let as_of = period.as_of();
        let wind_factor = match wind_factor {
            Some(w) => w,
            None => self
                .registry
                .scalar(keys::FUELEU_WIND_ASSIST_FACTOR, as_of)?,
        };
        let targets = self
            .registry
            .fuel_eu_targets(keys::FUELEU_TARGETS, as_of)?;
        let (target_year, target) =
            nearest_target(targets, year).ok_or_else(|| Error::MissingConstant {
                key: keys::FUELEU_TARGETS.to_string(),
                as_of,
            })?;
        let penalty_rate = self
            .registry
            .scalar(keys::FUELEU_PENALTY_RATE_PER_GJ, as_of)?;

        let mut total_energy_gj = 0.0;
        let mut wtt_t = 0.0;
        let mut ttw_t = 0.0;
        let mut rfnbo_energy_gj = 0.0;
        for record in &resolved.included {
            total_energy_gj += record.energy_gj;
            wtt_t += emissions_from_energy(record.energy_gj, record.wtt_gco2e_mj);
            ttw_t += emissions_from_energy(record.energy_gj, record.ttw_gco2e_mj)
                * (1.0 - record.methane_slip_pct / 100.0);
            if record.is_rfnbo {
                rfnbo_energy_gj += record.energy_gj;
            }
        }

        // Zero energy leaves every intensity at zero and the balance at zero.
        let wtt_intensity = intensity_from_emissions(wtt_t, total_energy_gj);
        let ttw_intensity = intensity_from_emissions(ttw_t, total_energy_gj);
        let attained_intensity = wind_factor * (wtt_intensity + ttw_intensity);

        let compliance_balance =
            (target.target_intensity - attained_intensity) * total_energy_gj * MJ_PER_GJ;
        let compliance_balance_t = compliance_balance * attained_intensity / GRAMS_PER_TONNE;
        let penalty_eur = if compliance_balance < 0.0 {
            compliance_balance.abs() / MJ_PER_GJ * penalty_rate
        } else {
            0.0
        };

        let rfnbo_incentive = if RFNBO_INCENTIVE_YEARS.contains(&year) {
            rfnbo_energy_gj
                * self
                    .registry
                    .scalar(keys::FUELEU_RFNBO_MULTIPLIER, as_of)?
        } else {
            0.0
        };

        debug!(
            subject_id,
            year,
            total_energy_gj,
            attained_intensity,
            target_intensity = target.target_intensity,
            compliance_balance,
            penalty_eur,
            "calculated FuelEU compliance"
        );

        Ok(FuelEuResult {
            subject_id: subject_id.to_string(),
            year,
            applicability,
            total_energy_gj,
            wtt_intensity,
            ttw_intensity,
            wind_factor,
            attained_intensity,
            target_intensity: target.target_intensity,
            target_year: Some(target_year),
            target_reduction: target.reduction,
            compliance_balance,
            compliance_balance_t,
            total_emissions_t: emissions_from_energy(total_energy_gj, attained_intensity),
            penalty_eur,
            rfnbo_energy_gj,
            rfnbo_incentive,
            records: resolved.outcomes,
            constants_fingerprint: self.registry.fingerprint().to_string(),
        })
    }

    /// Check the OPS obligation for one port call.
    ///
    /// Non-mandatory ports are always compliant. At a mandatory port the call
    /// is compliant only when a session exists and supplied at least the
    /// required energy; otherwise the shortfall is priced per kWh.
    pub fn assess_ops(
        &self,
        year: i32,
        port: &OpsPort,
        required_kwh: f64,
        session: Option<&OpsSession>,
    ) -> Result<OpsAssessment> {
        let period = ReportingPeriod::calendar_year(year)?;
        check_non_negative("required_kwh", required_kwh)?;
        if let Some(s) = session {
            check_non_negative("supplied_kwh", s.supplied_kwh)?;
        }

        let supplied_kwh = session.map_or(0.0, |s| s.supplied_kwh);
        let applicability = Applicability::for_period(&period, FUELEU_IN_FORCE_FROM);
        let mut assessment = OpsAssessment {
            year,
            port_code: port.port_code.clone(),
            applicability,
            mandatory: port.mandatory_ops,
            required_kwh,
            supplied_kwh,
            shortfall_kwh: 0.0,
            compliant: true,
            penalty_eur: 0.0,
        };

        if !applicability.is_in_force() || !port.mandatory_ops {
            return Ok(assessment);
        }

        if session.is_some() && supplied_kwh >= required_kwh {
            return Ok(assessment);
        }

        let rate = self
            .registry
            .scalar(keys::FUELEU_OPS_PENALTY_PER_KWH_EUR, period.as_of())?;
        assessment.compliant = false;
        assessment.shortfall_kwh = (required_kwh - supplied_kwh).max(0.0);
        assessment.penalty_eur = assessment.shortfall_kwh * rate;

        debug!(
            port = %port.port_code,
            year,
            shortfall_kwh = assessment.shortfall_kwh,
            penalty_eur = assessment.penalty_eur,
            "OPS obligation not met"
        );

        Ok(assessment)
    }

    fn not_in_force(
        &self,
        subject_id: &str,
        year: i32,
        applicability: Applicability,
        wind_factor: f64,
        records: Vec<RecordOutcome>,
    ) -> FuelEuResult {
        FuelEuResult {
            subject_id: subject_id.to_string(),
            year,
            applicability,
            total_energy_gj: 0.0,
            wtt_intensity: 0.0,
            ttw_intensity: 0.0,
            wind_factor,
            attained_intensity: 0.0,
            target_intensity: 0.0,
            target_year: None,
            target_reduction: 0.0,
            compliance_balance: 0.0,
            compliance_balance_t: 0.0,
            total_emissions_t: 0.0,
            penalty_eur: 0.0,
            rfnbo_energy_gj: 0.0,
            rfnbo_incentive: 0.0,
            records,
            constants_fingerprint: self.registry.fingerprint().to_string(),
        }
    }
}

/// The target row for `year`, or the row nearest to it. Equidistant rows
/// resolve to the earlier year.
fn nearest_target(targets: &BTreeMap<i32, FuelEuTarget>, year: i32) -> Option<(i32, FuelEuTarget)> {
    if let Some(target) = targets.get(&year) {
        return Some((year, *target));
    }
    targets
        .iter()
        .min_by_key(|(y, _)| ((i64::from(**y) - i64::from(year)).unsigned_abs(), **y))
        .map(|(y, t)| (*y, *t))
}
