//! Annual roll-up of per-voyage or per-vessel results.

use serde::{Deserialize, Serialize};

use crate::calc::{FuelEuResult, ImoResult, TradingResult};
use crate::error::{Error, Result};
use crate::registry::Framework;

/// What a single calculation result contributes to an annual total.
pub trait AnnualContribution {
    fn framework(&self) -> Framework;
    fn year(&self) -> i32;
    /// Emissions in tonnes CO2e.
    fn emissions_t(&self) -> f64;
    /// Allowances to surrender (trading schemes) or compliance units owed.
    fn allowances(&self) -> f64;
    /// Monetary cost in the framework's currency.
    fn cost(&self) -> f64;
}

impl AnnualContribution for FuelEuResult {
    fn framework(&self) -> Framework {
        Framework::FuelEu
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn emissions_t(&self) -> f64 {
        self.total_emissions_t
    }

    fn allowances(&self) -> f64 {
        self.compliance_balance_t
    }

    fn cost(&self) -> f64 {
        self.penalty_eur
    }
}

impl AnnualContribution for TradingResult {
    fn framework(&self) -> Framework {
        self.framework
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn emissions_t(&self) -> f64 {
        self.total_co2e_t
    }

    fn allowances(&self) -> f64 {
        self.allowances
    }

    fn cost(&self) -> f64 {
        self.estimated_cost
    }
}

impl AnnualContribution for ImoResult {
    fn framework(&self) -> Framework {
        Framework::Imo
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn emissions_t(&self) -> f64 {
        self.total_emissions_t
    }

    fn allowances(&self) -> f64 {
        self.gap_t
    }

    fn cost(&self) -> f64 {
        self.remedial_cost_eur
    }
}

/// Sum of same-framework results for one reporting year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualAggregate {
    pub year: i32,
    /// `None` when no results were aggregated.
    pub framework: Option<Framework>,
    pub total_emissions_t: f64,
    pub total_allowances: f64,
    pub total_cost: f64,
    pub result_count: usize,
}

impl AnnualAggregate {
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            framework: None,
            total_emissions_t: 0.0,
            total_allowances: 0.0,
            total_cost: 0.0,
            result_count: 0,
        }
    }

    /// Add one result, rejecting results from another year or framework.
    pub fn add<C: AnnualContribution + ?Sized>(&mut self, result: &C) -> Result<()> {
        if result.year() != self.year {
            return Err(Error::MixedAggregate {
                expected: self.year,
                found: result.year(),
            });
        }
        match self.framework {
            Some(framework) if framework != result.framework() => {
                return Err(Error::InvalidInput {
                    message: format!(
                        "cannot add a {} result to a {} annual total",
                        result.framework(),
                        framework
                    ),
                });
            }
            _ => self.framework = Some(result.framework()),
        }

        self.total_emissions_t += result.emissions_t();
        self.total_allowances += result.allowances();
        self.total_cost += result.cost();
        self.result_count += 1;
        Ok(())
    }
}

/// Reduce a sequence of results for `year` into an [`AnnualAggregate`].
pub fn aggregate_annual<'a, C, I>(year: i32, results: I) -> Result<AnnualAggregate>
where
    C: AnnualContribution + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let mut aggregate = AnnualAggregate::empty(year);
    for result in results {
        aggregate.add(result)?;
    }
    Ok(aggregate)
}
