//! Keys of the built-in regulatory constants.
//!
//! Calculators read targets, rates, prices, phase-in tables and GWP values
//! from the registry. Launch dates, coverage tables, deadlines, limits and
//! thresholds are carried for reporting only; the calculators use the fixed
//! parameters in [`crate::calc::constants`] and the coefficients from
//! [`crate::voyage`] instead.

pub const FUELEU_BASELINE_INTENSITY: &str = "FUELEU_BASELINE_INTENSITY";
pub const FUELEU_TARGETS: &str = "FUELEU_TARGETS";
pub const FUELEU_PENALTY_RATE_PER_GJ: &str = "FUELEU_PENALTY_RATE_PER_GJ";
pub const FUELEU_PENALTY_RATE_PER_TONNE_CO2EQ: &str = "FUELEU_PENALTY_RATE_PER_TONNE_CO2EQ";
pub const FUELEU_BANKING_LIMIT_PCT: &str = "FUELEU_BANKING_LIMIT_PCT";
pub const FUELEU_BORROWING_LIMIT_PCT: &str = "FUELEU_BORROWING_LIMIT_PCT";
pub const FUELEU_RFNBO_MULTIPLIER: &str = "FUELEU_RFNBO_MULTIPLIER";
pub const FUELEU_WIND_ASSIST_FACTOR: &str = "FUELEU_WIND_ASSIST_FACTOR";
pub const FUELEU_OPS_COVERAGE_PCT: &str = "FUELEU_OPS_COVERAGE_PCT";
pub const FUELEU_OPS_PENALTY_PER_KWH_EUR: &str = "FUELEU_OPS_PENALTY_PER_KWH_EUR";

pub const EU_ETS_PHASE_IN: &str = "EU_ETS_PHASE_IN";
pub const EU_ETS_VOYAGE_COVERAGE: &str = "EU_ETS_VOYAGE_COVERAGE";
pub const EU_ETS_ALLOWANCE_PRICE_EUR: &str = "EU_ETS_ALLOWANCE_PRICE_EUR";
pub const EU_ETS_EMISSION_FACTOR_HFO: &str = "EU_ETS_EMISSION_FACTOR_HFO";
pub const EU_ETS_GWP_VALUES: &str = "EU_ETS_GWP_VALUES";
pub const EU_ETS_SURRENDER_DEADLINE: &str = "EU_ETS_SURRENDER_DEADLINE";

pub const IMO_GFI_TARGETS: &str = "IMO_GFI_TARGETS";
pub const IMO_TIER1_PRICE_EUR: &str = "IMO_TIER1_PRICE_EUR";
pub const IMO_TIER2_PRICE_EUR: &str = "IMO_TIER2_PRICE_EUR";
pub const IMO_ZNZ_THRESHOLDS: &str = "IMO_ZNZ_THRESHOLDS";
pub const IMO_SURPLUS_VALIDITY_YEARS: &str = "IMO_SURPLUS_VALIDITY_YEARS";
pub const IMO_REGISTRY_OPENING: &str = "IMO_REGISTRY_OPENING";

pub const UK_ETS_LAUNCH_DATE: &str = "UK_ETS_LAUNCH_DATE";
pub const UK_ETS_COVERAGE: &str = "UK_ETS_COVERAGE";
pub const UK_ETS_PRICE_RANGE_GBP: &str = "UK_ETS_PRICE_RANGE_GBP";
pub const UK_ETS_MARKET_SIZE_ALLOWANCES: &str = "UK_ETS_MARKET_SIZE_ALLOWANCES";
pub const UK_ETS_SURRENDER_DEADLINE: &str = "UK_ETS_SURRENDER_DEADLINE";
pub const UK_ETS_GWP_VALUES: &str = "UK_ETS_GWP_VALUES";
pub const UK_ETS_VESSEL_THRESHOLD_GT: &str = "UK_ETS_VESSEL_THRESHOLD_GT";
