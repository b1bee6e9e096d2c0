//! IMO Net-Zero Framework (GHG Fuel Intensity) calculator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::energy::{emissions_from_energy, intensity_from_emissions};
use crate::error::{Error, Result};
use crate::fuel::consumption::resolve_records;
use crate::fuel::{ConsumptionRecord, FuelLookup, RecordOutcome};
use crate::period::ReportingPeriod;
use crate::registry::{keys, ConstantRegistry, GfiMilestone};

use super::constants::{IMO_BASELINE_GFI, IMO_IN_FORCE_FROM, IMO_TIER_THRESHOLD_T};
use super::Applicability;

/// Remedial pricing tier applied to a compliance gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Compliant,
    Tier1,
    Tier2,
}

/// Which milestone a target came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GfiTargetKind {
    Minimum,
    NetZero,
    Baseline,
}

/// Target GFI in force for a reporting year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GfiTarget {
    pub target_gfi: f64,
    pub reduction: f64,
    pub kind: GfiTargetKind,
}

/// IMO GFI outcome for one vessel and reporting year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImoResult {
    pub subject_id: String,
    pub year: i32,
    pub applicability: Applicability,
    pub total_energy_gj: f64,
    pub attained_gfi: f64,
    pub target_gfi: f64,
    pub target_kind: GfiTargetKind,
    pub reduction: f64,
    /// Attained minus target, in gCO2e/MJ.
    pub gap_gco2e_mj: f64,
    /// Gap in tonnes CO2e; negative means the vessel beat its target.
    pub gap_t: f64,
    pub total_emissions_t: f64,
    pub tier: Tier,
    pub remedial_cost_eur: f64,
    pub records: Vec<RecordOutcome>,
    pub constants_fingerprint: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ImoCalculator<'a> {
    registry: &'a ConstantRegistry,
}

impl<'a> ImoCalculator<'a> {
    pub fn new(registry: &'a ConstantRegistry) -> Self {
        Self { registry }
    }

    /// Attained vs. target GFI and the remedial cost of any gap.
    ///
    /// Before the framework takes effect the gap is measured against the
    /// baseline and priced with the tier prices of the first in-force year;
    /// the result is tagged [`Applicability::NotInForce`].
    pub fn calculate<L>(
        &self,
        subject_id: &str,
        year: i32,
        records: &[ConsumptionRecord],
        fuels: &L,
    ) -> Result<ImoResult>
    where
        L: FuelLookup + ?Sized,
    {
        let period = ReportingPeriod::calendar_year(year)?;
        let resolved = resolve_records(records, fuels)?;

        let mut total_energy_gj = 0.0;
        let mut wtw_t = 0.0;
        for record in &resolved.included {
            total_energy_gj += record.energy_gj;
            wtw_t += emissions_from_energy(record.energy_gj, record.wtw_gco2e_mj);
        }
        let attained_gfi = intensity_from_emissions(wtw_t, total_energy_gj);

        let applicability = Applicability::for_period(&period, IMO_IN_FORCE_FROM);
        let target = if applicability.is_in_force() {
            let as_of = period.as_of();
            let milestones = self.registry.gfi_targets(keys::IMO_GFI_TARGETS, as_of)?;
            target_for_year(milestones, year).ok_or_else(|| Error::MissingConstant {
                key: keys::IMO_GFI_TARGETS.to_string(),
                as_of,
            })?
        } else {
            GfiTarget {
                target_gfi: IMO_BASELINE_GFI,
                reduction: 0.0,
                kind: GfiTargetKind::Baseline,
            }
        };

        let gap_gco2e_mj = attained_gfi - target.target_gfi;
        let gap_t = emissions_from_energy(total_energy_gj, gap_gco2e_mj);

        let price_date = period.as_of().max(IMO_IN_FORCE_FROM);
        let tier1 = self.registry.scalar(keys::IMO_TIER1_PRICE_EUR, price_date)?;
        let tier2 = self.registry.scalar(keys::IMO_TIER2_PRICE_EUR, price_date)?;
        let (tier, remedial_cost_eur) = price_gap(gap_t, tier1, tier2);

        debug!(
            subject_id,
            year,
            attained_gfi,
            target_gfi = target.target_gfi,
            gap_t,
            ?tier,
            remedial_cost_eur,
            "calculated IMO GFI compliance"
        );

        Ok(ImoResult {
            subject_id: subject_id.to_string(),
            year,
            applicability,
            total_energy_gj,
            attained_gfi,
            target_gfi: target.target_gfi,
            target_kind: target.kind,
            reduction: target.reduction,
            gap_gco2e_mj,
            gap_t,
            total_emissions_t: wtw_t,
            tier,
            remedial_cost_eur,
            records: resolved.outcomes,
            constants_fingerprint: self.registry.fingerprint().to_string(),
        })
    }
}

/// Milestone band for a year: 2028-2039 use the 2030 minimum, 2040-2049 the
/// 2040 minimum, 2050 onwards the net-zero target.
pub fn target_for_year(milestones: &BTreeMap<i32, GfiMilestone>, year: i32) -> Option<GfiTarget> {
    let (milestone, kind) = match year {
        i32::MIN..=2027 => return None,
        2028..=2039 => (2030, GfiTargetKind::Minimum),
        2040..=2049 => (2040, GfiTargetKind::Minimum),
        _ => (2050, GfiTargetKind::NetZero),
    };
    milestones.get(&milestone).map(|m| GfiTarget {
        target_gfi: m.target_gfi,
        reduction: m.reduction,
        kind,
    })
}

/// Tier and cost for a gap. The whole gap is priced at one tier: Tier 1 up
/// to and including the threshold, Tier 2 above it.
pub fn price_gap(gap_t: f64, tier1_price: f64, tier2_price: f64) -> (Tier, f64) {
    if gap_t <= 0.0 {
        (Tier::Compliant, 0.0)
    } else if gap_t <= IMO_TIER_THRESHOLD_T {
        (Tier::Tier1, gap_t * tier1_price)
    } else {
        (Tier::Tier2, gap_t * tier2_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milestones() -> BTreeMap<i32, GfiMilestone> {
        let m = |reduction, target_gfi| GfiMilestone {
            reduction,
            aspirational: None,
            target_gfi,
        };
        BTreeMap::from([
            (2030, m(0.20, 72.93)),
            (2040, m(0.70, 27.35)),
            (2050, m(0.96, 3.65)),
        ])
    }

    #[test]
    fn year_bands_map_to_milestones() {
        let table = milestones();
        assert!(target_for_year(&table, 2027).is_none());
        assert_eq!(target_for_year(&table, 2028).unwrap().target_gfi, 72.93);
        assert_eq!(target_for_year(&table, 2039).unwrap().target_gfi, 72.93);
        assert_eq!(target_for_year(&table, 2040).unwrap().target_gfi, 27.35);
        let net_zero = target_for_year(&table, 2051).unwrap();
        assert_eq!(net_zero.kind, GfiTargetKind::NetZero);
        assert_eq!(net_zero.target_gfi, 3.65);
    }

    #[test]
    fn threshold_gap_is_tier_one() {
        assert_eq!(price_gap(1_000.0, 100.0, 380.0), (Tier::Tier1, 100_000.0));
    }

    #[test]
    fn smallest_gap_above_threshold_is_tier_two() {
        let gap = f64::from_bits(1_000.0_f64.to_bits() + 1);
        let (tier, cost) = price_gap(gap, 100.0, 380.0);
        assert_eq!(tier, Tier::Tier2);
        assert!((cost - 380_000.0).abs() < 1e-6);
    }

    #[test]
    fn negative_gap_is_compliant() {
        assert_eq!(price_gap(-5.0, 100.0, 380.0), (Tier::Compliant, 0.0));
        assert_eq!(price_gap(0.0, 100.0, 380.0), (Tier::Compliant, 0.0));
    }
}
