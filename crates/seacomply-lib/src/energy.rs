//! Unit conversions shared by every calculator.
//!
//! All quantities flow through three units: fuel mass in tonnes, energy in
//! gigajoules and emissions in tonnes of CO2-equivalent. Intensity factors are
//! expressed in grams of CO2e per megajoule.

use crate::registry::GwpValues;

/// Megajoules per gigajoule.
pub const MJ_PER_GJ: f64 = 1_000.0;

/// Grams per tonne.
pub const GRAMS_PER_TONNE: f64 = 1_000_000.0;

/// Energy content of burned fuel in GJ.
///
/// `tonnes × 1000 kg/t × lcv MJ/kg ÷ 1000 MJ/GJ`; the two factors of 1000
/// cancel, so the product of mass and LCV is already in GJ.
///
/// ```
/// use seacomply_lib::energy::energy_from_mass;
///
/// assert_eq!(energy_from_mass(1_000.0, 40.2), 40_200.0);
/// ```
pub fn energy_from_mass(mass_tonnes: f64, lcv_mj_per_kg: f64) -> f64 {
    mass_tonnes * lcv_mj_per_kg
}

/// Tonnes of CO2e released by `energy_gj` of fuel at an intensity of
/// `factor_gco2e_per_mj`.
pub fn emissions_from_energy(energy_gj: f64, factor_gco2e_per_mj: f64) -> f64 {
    energy_gj * MJ_PER_GJ * factor_gco2e_per_mj / GRAMS_PER_TONNE
}

/// Inverse of [`emissions_from_energy`]: the average intensity in gCO2e/MJ
/// of `emissions_t` spread over `energy_gj`.
///
/// Returns zero when there is no energy to divide by.
pub fn intensity_from_emissions(emissions_t: f64, energy_gj: f64) -> f64 {
    if energy_gj <= 0.0 {
        return 0.0;
    }
    emissions_t * GRAMS_PER_TONNE / (energy_gj * MJ_PER_GJ)
}

/// Combine per-gas tonnages into tonnes of CO2-equivalent.
///
/// CO2 is the reference gas and is never re-weighted. Callers decide whether
/// non-CO2 gases count at all for the reporting period; this function only
/// applies the weights it is given.
pub fn co2_equivalent(co2_t: f64, ch4_t: f64, n2o_t: f64, gwp: &GwpValues) -> f64 {
    co2_t + ch4_t * gwp.ch4 + n2o_t * gwp.n2o
}
