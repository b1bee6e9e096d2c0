//! Fleet-year batches: run a calculator over every voyage or vessel of a
//! reporting year and roll the results up.
//!
//! FuelEU and IMO obligations attach to a vessel's whole year, so their
//! records are grouped per vessel. Trading-scheme obligations attach to each
//! voyage and its coverage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{aggregate_annual, AnnualAggregate};
use crate::calc::{
    FuelEuCalculator, FuelEuResult, ImoCalculator, ImoResult, TradingCalculator, TradingResult,
    TradingScheme,
};
use crate::error::Result;
use crate::fuel::{ConsumptionRecord, FuelLookup};
use crate::registry::{ConstantRegistry, Framework};
use crate::voyage::{classify_voyage, PortFlags};

/// One voyage and the fuel burned on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoyageInput {
    pub voyage_id: String,
    pub vessel_id: String,
    /// Explicit EU ETS coverage; derived from the ports when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_eu: Option<f64>,
    /// Explicit UK ETS coverage; derived from the ports when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_uk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<PortFlags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<PortFlags>,
    #[serde(default)]
    pub records: Vec<ConsumptionRecord>,
}

impl VoyageInput {
    /// Coverage coefficient for a trading framework. Voyages with neither an
    /// explicit coefficient nor both port flags are not covered.
    pub fn coverage_for(&self, framework: Framework) -> f64 {
        let explicit = match framework {
            Framework::EuEts => self.coverage_eu,
            Framework::UkEts => self.coverage_uk,
            Framework::FuelEu | Framework::Imo => None,
        };
        if let Some(coverage) = explicit {
            return coverage;
        }

        match (self.departure, self.arrival) {
            (Some(dep), Some(arr)) => {
                let coverage = classify_voyage(dep, arr);
                match framework {
                    Framework::EuEts => coverage.eu_coverage,
                    Framework::UkEts => coverage.uk_coverage,
                    Framework::FuelEu | Framework::Imo => 0.0,
                }
            }
            _ => 0.0,
        }
    }
}

/// All voyages of a fleet for one reporting year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetYear {
    pub year: i32,
    /// FuelEU wind-assist reward factor applied to every vessel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_factor: Option<f64>,
    #[serde(default)]
    pub voyages: Vec<VoyageInput>,
}

impl FleetYear {
    /// Consumption records grouped by vessel, vessels in id order and
    /// records in voyage order.
    pub fn vessel_records(&self) -> BTreeMap<&str, Vec<ConsumptionRecord>> {
        let mut grouped: BTreeMap<&str, Vec<ConsumptionRecord>> = BTreeMap::new();
        for voyage in &self.voyages {
            grouped
                .entry(voyage.vessel_id.as_str())
                .or_default()
                .extend(voyage.records.iter().cloned());
        }
        grouped
    }
}

/// Per-subject results of a fleet-year batch plus their annual total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetAssessment<R> {
    pub results: Vec<R>,
    pub annual: AnnualAggregate,
}

/// FuelEU per vessel.
pub fn assess_fuel_eu<L>(
    registry: &ConstantRegistry,
    fuels: &L,
    fleet: &FleetYear,
) -> Result<FleetAssessment<FuelEuResult>>
where
    L: FuelLookup + ?Sized,
{
    let calculator = FuelEuCalculator::new(registry);
    let results = fleet
        .vessel_records()
        .into_iter()
        .map(|(vessel, records)| {
            calculator.calculate(vessel, fleet.year, &records, fuels, fleet.wind_factor)
        })
        .collect::<Result<Vec<_>>>()?;
    finish(Framework::FuelEu, fleet.year, results)
}

/// EU ETS per voyage.
pub fn assess_eu_ets<L>(
    registry: &ConstantRegistry,
    fuels: &L,
    fleet: &FleetYear,
    allowance_price: Option<f64>,
) -> Result<FleetAssessment<TradingResult>>
where
    L: FuelLookup + ?Sized,
{
    assess_trading(
        TradingScheme::eu_ets(),
        registry,
        fuels,
        fleet,
        allowance_price,
    )
}

/// UK ETS per voyage.
pub fn assess_uk_ets<L>(
    registry: &ConstantRegistry,
    fuels: &L,
    fleet: &FleetYear,
    allowance_price: Option<f64>,
) -> Result<FleetAssessment<TradingResult>>
where
    L: FuelLookup + ?Sized,
{
    assess_trading(
        TradingScheme::uk_ets(),
        registry,
        fuels,
        fleet,
        allowance_price,
    )
}

/// IMO GFI per vessel.
pub fn assess_imo<L>(
    registry: &ConstantRegistry,
    fuels: &L,
    fleet: &FleetYear,
) -> Result<FleetAssessment<ImoResult>>
where
    L: FuelLookup + ?Sized,
{
    let calculator = ImoCalculator::new(registry);
    let results = fleet
        .vessel_records()
        .into_iter()
        .map(|(vessel, records)| calculator.calculate(vessel, fleet.year, &records, fuels))
        .collect::<Result<Vec<_>>>()?;
    finish(Framework::Imo, fleet.year, results)
}

fn assess_trading<L>(
    scheme: TradingScheme,
    registry: &ConstantRegistry,
    fuels: &L,
    fleet: &FleetYear,
    allowance_price: Option<f64>,
) -> Result<FleetAssessment<TradingResult>>
where
    L: FuelLookup + ?Sized,
{
    let calculator = TradingCalculator::new(registry, scheme);
    let results = fleet
        .voyages
        .iter()
        .map(|voyage| {
            calculator.calculate(
                &voyage.voyage_id,
                fleet.year,
                voyage.coverage_for(scheme.framework),
                &voyage.records,
                fuels,
                allowance_price,
            )
        })
        .collect::<Result<Vec<_>>>()?;
    finish(scheme.framework, fleet.year, results)
}

fn finish<R>(framework: Framework, year: i32, results: Vec<R>) -> Result<FleetAssessment<R>>
where
    R: crate::aggregate::AnnualContribution,
{
    let annual = aggregate_annual(year, &results)?;
    info!(
        %framework,
        year,
        results = annual.result_count,
        total_emissions_t = annual.total_emissions_t,
        total_cost = annual.total_cost,
        "assessed fleet year"
    );
    Ok(FleetAssessment { results, annual })
}
