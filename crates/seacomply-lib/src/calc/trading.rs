//! Emissions trading schemes (EU ETS, UK ETS).
//!
//! Both schemes share one algorithm: sum per-gas tonnages from the fuel
//! burned, weight non-CO2 gases once multi-GHG accounting has started, then
//! scale by the phase-in share and the voyage coverage to get the allowances
//! to surrender. A [`TradingScheme`] captures what differs between them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::energy::co2_equivalent;
use crate::error::Result;
use crate::fuel::consumption::resolve_records;
use crate::fuel::{ConsumptionRecord, FuelLookup, RecordOutcome};
use crate::period::ReportingPeriod;
use crate::registry::{keys, ConstantRegistry, Framework};

use super::constants::{EU_ETS_LAUNCH, EU_ETS_MULTI_GHG_FROM, UK_ETS_LAUNCH};
use super::{check_fraction, check_non_negative, Applicability};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Gbp,
}

/// Where the share of emissions due in a given year comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseInSource {
    /// Year-indexed table in the registry; years missing from it count fully.
    Schedule(&'static str),
    /// No ramp-up: every covered tonne counts from launch.
    Full,
}

/// Where the default allowance price comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    /// Single reference price (scalar constant).
    Reference(&'static str),
    /// Midpoint of a published auction price band.
    RangeMidpoint(&'static str),
}

/// Capabilities that distinguish one trading scheme from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingScheme {
    pub framework: Framework,
    pub currency: Currency,
    pub launch: NaiveDate,
    pub multi_ghg_from: NaiveDate,
    pub gwp_key: &'static str,
    pub phase_in: PhaseInSource,
    pub price: PriceSource,
}

impl TradingScheme {
    pub fn eu_ets() -> Self {
        Self {
            framework: Framework::EuEts,
            currency: Currency::Eur,
            launch: EU_ETS_LAUNCH,
            multi_ghg_from: EU_ETS_MULTI_GHG_FROM,
            gwp_key: keys::EU_ETS_GWP_VALUES,
            phase_in: PhaseInSource::Schedule(keys::EU_ETS_PHASE_IN),
            price: PriceSource::Reference(keys::EU_ETS_ALLOWANCE_PRICE_EUR),
        }
    }

    pub fn uk_ets() -> Self {
        Self {
            framework: Framework::UkEts,
            currency: Currency::Gbp,
            launch: UK_ETS_LAUNCH,
            multi_ghg_from: UK_ETS_LAUNCH,
            gwp_key: keys::UK_ETS_GWP_VALUES,
            phase_in: PhaseInSource::Full,
            price: PriceSource::RangeMidpoint(keys::UK_ETS_PRICE_RANGE_GBP),
        }
    }

    /// Scheme descriptor for a framework, if that framework trades allowances.
    pub fn for_framework(framework: Framework) -> Option<Self> {
        match framework {
            Framework::EuEts => Some(Self::eu_ets()),
            Framework::UkEts => Some(Self::uk_ets()),
            Framework::FuelEu | Framework::Imo => None,
        }
    }
}

/// Allowance requirement for one voyage (or vessel) and reporting year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingResult {
    pub framework: Framework,
    pub currency: Currency,
    pub subject_id: String,
    pub year: i32,
    pub applicability: Applicability,
    /// Whether CH4 and N2O were counted for this year.
    pub multi_ghg: bool,
    pub co2_t: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ch4_t: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n2o_t: Option<f64>,
    pub total_co2e_t: f64,
    pub coverage: f64,
    pub phase_in: f64,
    pub allowances: f64,
    pub allowance_price: f64,
    pub estimated_cost: f64,
    pub records: Vec<RecordOutcome>,
    pub constants_fingerprint: String,
}

/// A [`TradingScheme`] bound to a constants snapshot.
#[derive(Debug, Clone, Copy)]
pub struct TradingCalculator<'a> {
    registry: &'a ConstantRegistry,
    scheme: TradingScheme,
}

impl<'a> TradingCalculator<'a> {
    pub fn new(registry: &'a ConstantRegistry, scheme: TradingScheme) -> Self {
        Self { registry, scheme }
    }

    pub fn eu_ets(registry: &'a ConstantRegistry) -> Self {
        Self::new(registry, TradingScheme::eu_ets())
    }

    pub fn uk_ets(registry: &'a ConstantRegistry) -> Self {
        Self::new(registry, TradingScheme::uk_ets())
    }

    pub fn scheme(&self) -> &TradingScheme {
        &self.scheme
    }

    /// Allowances and cost for the records of one voyage.
    ///
    /// `coverage` is the share of the voyage the scheme covers (for the EU
    /// ETS 1.0 intra-EU, 0.5 extra-EU). `allowance_price` overrides the
    /// registry's reference price.
    pub fn calculate<L>(
        &self,
        subject_id: &str,
        year: i32,
        coverage: f64,
        records: &[ConsumptionRecord],
        fuels: &L,
        allowance_price: Option<f64>,
    ) -> Result<TradingResult>
    where
        L: FuelLookup + ?Sized,
    {
        let scheme = &self.scheme;
        let period = ReportingPeriod::calendar_year(year)?;
        check_fraction("coverage", coverage)?;
        if let Some(price) = allowance_price {
            check_non_negative("allowance_price", price)?;
        }

        let resolved = resolve_records(records, fuels)?;

        let applicability = Applicability::for_period(&period, scheme.launch);
        if !applicability.is_in_force() {
            return Ok(self.not_in_force(subject_id, year, applicability, resolved.outcomes));
        }

        let as_of = period.as_of();
        let (mut co2_t, mut ch4_t, mut n2o_t) = (0.0, 0.0, 0.0);
        for record in &resolved.included {
            co2_t += record.mass_tonnes * record.co2_factor_t;
            ch4_t += record.mass_tonnes * record.ch4_factor_t;
            n2o_t += record.mass_tonnes * record.n2o_factor_t;
        }

        let multi_ghg = period.covers(scheme.multi_ghg_from);
        let total_co2e_t = if multi_ghg {
            let gwp = self.registry.gwp(scheme.gwp_key, as_of)?;
            co2_equivalent(co2_t, ch4_t, n2o_t, &gwp)
        } else {
            co2_t
        };

        let phase_in = match scheme.phase_in {
            PhaseInSource::Schedule(key) => self
                .registry
                .year_table(key, as_of)?
                .get(&year)
                .copied()
                .unwrap_or(1.0),
            PhaseInSource::Full => 1.0,
        };

        let allowance_price = match (allowance_price, scheme.price) {
            (Some(price), _) => price,
            (None, PriceSource::Reference(key)) => self.registry.scalar(key, as_of)?,
            (None, PriceSource::RangeMidpoint(key)) => {
                self.registry.price_range(key, as_of)?.midpoint()
            }
        };

        let allowances = total_co2e_t * phase_in * coverage;
        let estimated_cost = allowances * allowance_price;

        debug!(
            framework = %scheme.framework,
            subject_id,
            year,
            total_co2e_t,
            phase_in,
            coverage,
            allowances,
            estimated_cost,
            "calculated trading scheme allowances"
        );

        Ok(TradingResult {
            framework: scheme.framework,
            currency: scheme.currency,
            subject_id: subject_id.to_string(),
            year,
            applicability,
            multi_ghg,
            co2_t,
            ch4_t: multi_ghg.then_some(ch4_t),
            n2o_t: multi_ghg.then_some(n2o_t),
            total_co2e_t,
            coverage,
            phase_in,
            allowances,
            allowance_price,
            estimated_cost,
            records: resolved.outcomes,
            constants_fingerprint: self.registry.fingerprint().to_string(),
        })
    }

    fn not_in_force(
        &self,
        subject_id: &str,
        year: i32,
        applicability: Applicability,
        records: Vec<RecordOutcome>,
    ) -> TradingResult {
        TradingResult {
            framework: self.scheme.framework,
            currency: self.scheme.currency,
            subject_id: subject_id.to_string(),
            year,
            applicability,
            multi_ghg: false,
            co2_t: 0.0,
            ch4_t: None,
            n2o_t: None,
            total_co2e_t: 0.0,
            coverage: 0.0,
            phase_in: 0.0,
            allowances: 0.0,
            allowance_price: 0.0,
            estimated_cost: 0.0,
            records,
            constants_fingerprint: self.registry.fingerprint().to_string(),
        }
    }
}
