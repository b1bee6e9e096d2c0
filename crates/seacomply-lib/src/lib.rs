//! Maritime decarbonization compliance calculation core.
//!
//! This crate turns fuel-consumption records into emissions, compliance
//! balances, penalties and allowance costs under FuelEU Maritime, the EU ETS,
//! the UK ETS and the IMO Net-Zero Framework. Every numeric regulatory
//! parameter comes from a time-versioned [`ConstantRegistry`] that is built
//! once and shared read-only. Higher-level consumers (the CLI, batch jobs)
//! should only depend on the items exported here.

pub mod aggregate;
pub mod calc;
pub mod energy;
pub mod error;
pub mod fleet;
pub mod fuel;
pub mod period;
pub mod registry;
pub mod voyage;

pub use aggregate::{aggregate_annual, AnnualAggregate, AnnualContribution};
pub use calc::{
    Applicability, Currency, FuelEuCalculator, FuelEuResult, ImoCalculator, ImoResult,
    OpsAssessment, OpsPort, OpsSession, Tier, TradingCalculator, TradingResult, TradingScheme,
};
pub use error::{Error, Result};
pub use fleet::{
    assess_eu_ets, assess_fuel_eu, assess_imo, assess_uk_ets, FleetAssessment, FleetYear,
    VoyageInput,
};
pub use fuel::consumption::resolve_records;
pub use fuel::{ConsumptionRecord, Fuel, FuelCatalog, FuelLookup, RecordOutcome, RecordStatus};
pub use period::ReportingPeriod;
pub use registry::{ConstantRegistry, ConstantValue, Framework, RegulatoryConstant};
pub use voyage::{
    classify_voyage, validate_distance, voyage_segments, Coordinates, DistanceCheck, PortFlags,
    VoyageCoverage, VoyageSegment, VoyageType,
};
