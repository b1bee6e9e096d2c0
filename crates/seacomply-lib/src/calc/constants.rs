//! Fixed parameters of the calculators that are not versioned in the
//! constants registry.

use chrono::NaiveDate;

use crate::period::ymd;

/// First day FuelEU Maritime obligations apply.
pub const FUELEU_IN_FORCE_FROM: NaiveDate = ymd(2025, 1, 1);

/// Reporting years in which RFNBO energy earns the reward multiplier.
pub const RFNBO_INCENTIVE_YEARS: std::ops::RangeInclusive<i32> = 2025..=2033;

/// First day maritime voyages are covered by the EU ETS.
pub const EU_ETS_LAUNCH: NaiveDate = ymd(2024, 1, 1);

/// First day CH4 and N2O count towards EU ETS surrender obligations.
pub const EU_ETS_MULTI_GHG_FROM: NaiveDate = ymd(2026, 1, 1);

/// First day maritime voyages are covered by the UK ETS.
pub const UK_ETS_LAUNCH: NaiveDate = ymd(2026, 7, 1);

/// First day IMO GFI targets apply.
pub const IMO_IN_FORCE_FROM: NaiveDate = ymd(2028, 1, 1);

/// GHG Fuel Intensity reference used when no IMO target is in force yet
/// (gCO2e/MJ, the 2008 fleet baseline).
pub const IMO_BASELINE_GFI: f64 = 91.16;

/// Compliance gap (tCO2e) above which Tier 2 remedial pricing applies to
/// the whole gap.
pub const IMO_TIER_THRESHOLD_T: f64 = 1_000.0;
