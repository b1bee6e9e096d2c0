//! Dispatch of a fleet-year request to the calculator of one framework.

use serde::Serialize;

use seacomply_lib::fleet::{assess_eu_ets, assess_fuel_eu, assess_imo, assess_uk_ets};
use seacomply_lib::{
    ConstantRegistry, Error, FleetAssessment, FleetYear, Framework, FuelCatalog, FuelEuResult,
    ImoResult, TradingResult,
};

/// Results of a fleet-year run for any framework.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Assessment {
    FuelEu(FleetAssessment<FuelEuResult>),
    Trading(FleetAssessment<TradingResult>),
    Imo(FleetAssessment<ImoResult>),
}

impl Assessment {
    pub fn annual(&self) -> &seacomply_lib::AnnualAggregate {
        match self {
            Assessment::FuelEu(a) => &a.annual,
            Assessment::Trading(a) => &a.annual,
            Assessment::Imo(a) => &a.annual,
        }
    }
}

/// Run the calculator for `framework` over every voyage or vessel in `fleet`.
///
/// An allowance price only makes sense for trading schemes.
pub fn run(
    framework: Framework,
    registry: &ConstantRegistry,
    fuels: &FuelCatalog,
    fleet: &FleetYear,
    allowance_price: Option<f64>,
) -> seacomply_lib::Result<Assessment> {
    if allowance_price.is_some() && !matches!(framework, Framework::EuEts | Framework::UkEts) {
        return Err(Error::InvalidInput {
            message: format!("an allowance price does not apply to {framework}"),
        });
    }

    Ok(match framework {
        Framework::FuelEu => Assessment::FuelEu(assess_fuel_eu(registry, fuels, fleet)?),
        Framework::EuEts => {
            Assessment::Trading(assess_eu_ets(registry, fuels, fleet, allowance_price)?)
        }
        Framework::UkEts => {
            Assessment::Trading(assess_uk_ets(registry, fuels, fleet, allowance_price)?)
        }
        Framework::Imo => Assessment::Imo(assess_imo(registry, fuels, fleet)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_override_is_rejected_for_intensity_frameworks() {
        let registry = ConstantRegistry::builtin().unwrap();
        let fuels = FuelCatalog::builtin().unwrap();
        let fleet = FleetYear {
            year: 2026,
            wind_factor: None,
            voyages: Vec::new(),
        };

        let err = run(Framework::Imo, &registry, &fuels, &fleet, Some(80.0))
            .expect_err("price does not apply");
        assert!(matches!(err, Error::InvalidInput { .. }));

        let ok = run(Framework::EuEts, &registry, &fuels, &fleet, Some(80.0)).unwrap();
        assert_eq!(ok.annual().result_count, 0);
    }
}
