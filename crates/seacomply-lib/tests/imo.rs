use seacomply_lib::calc::GfiTargetKind;
use seacomply_lib::{Applicability, ConsumptionRecord, ImoCalculator, Tier};

mod common;
use common::assert_close;

#[test]
fn before_2028_fuel_below_baseline_is_compliant() {
    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();
    let records = [ConsumptionRecord::new("LNG", 5_000.0)];

    let result = ImoCalculator::new(&registry)
        .calculate("IMO9321483", 2027, &records, &fuels)
        .unwrap();

    assert!(matches!(
        result.applicability,
        Applicability::NotInForce { .. }
    ));
    assert_eq!(result.target_gfi, 91.16);
    assert_eq!(result.reduction, 0.0);
    assert_eq!(result.target_kind, GfiTargetKind::Baseline);
    assert_eq!(result.tier, Tier::Compliant);
    assert_eq!(result.remedial_cost_eur, 0.0);
    assert_close(result.attained_gfi, 68.4);
    assert!(result.gap_t < 0.0);
}

#[test]
fn before_2028_gap_over_baseline_is_priced() {
    let registry = common::builtin_registry();
    let fuels = seacomply_lib::FuelCatalog::builtin().unwrap();
    let records = [ConsumptionRecord::new("HYDROGEN", 1_000.0)];

    let result = ImoCalculator::new(&registry)
        .calculate("IMO9321483", 2027, &records, &fuels)
        .unwrap();

    assert!(matches!(
        result.applicability,
        Applicability::NotInForce { .. }
    ));
    assert_close(result.attained_gfi, 113.8);
    assert_close(result.gap_t, 2_716.8);
    assert_eq!(result.tier, Tier::Tier2);
    assert!((result.remedial_cost_eur - 2_716.8 * 380.0).abs() < 1e-3);
}

#[test]
fn small_gap_is_priced_at_tier_one() {
    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();
    let records = [ConsumptionRecord::new("HFO", 1_000.0)];

    let result = ImoCalculator::new(&registry)
        .calculate("IMO9321483", 2030, &records, &fuels)
        .unwrap();

    assert_eq!(result.target_gfi, 72.93);
    assert_eq!(result.target_kind, GfiTargetKind::Minimum);
    assert_close(result.gap_gco2e_mj, 91.16 - 72.93);
    let gap_t = 40_200.0 * 1_000.0 * (91.16 - 72.93) / 1_000_000.0;
    assert_close(result.gap_t, gap_t);
    assert_eq!(result.tier, Tier::Tier1);
    assert_close(result.remedial_cost_eur, gap_t * 100.0);
}

#[test]
fn large_gap_is_priced_entirely_at_tier_two() {
    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();
    let records = [ConsumptionRecord::new("HFO", 2_000.0)];

    let result = ImoCalculator::new(&registry)
        .calculate("IMO9321483", 2030, &records, &fuels)
        .unwrap();

    assert!(result.gap_t > 1_000.0);
    assert_eq!(result.tier, Tier::Tier2);
    assert_close(result.remedial_cost_eur, result.gap_t * 380.0);
}

#[test]
fn record_well_to_wake_override_drives_attained_gfi() {
    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();
    let records = [
        ConsumptionRecord {
            wtw_gco2e_mj: Some(20.0),
            ..ConsumptionRecord::new("HFO", 100.0)
        },
        ConsumptionRecord::new("E_METHANOL", 100.0),
    ];

    let result = ImoCalculator::new(&registry)
        .calculate("S1", 2040, &records, &fuels)
        .unwrap();

    let expected = (20.0 * 4_020.0 + 35.4 * 1_990.0) / (4_020.0 + 1_990.0);
    assert_close(result.attained_gfi, expected);
    assert_eq!(result.target_gfi, 27.35);
    assert_eq!(result.tier, Tier::Compliant);
    assert_eq!(result.remedial_cost_eur, 0.0);
}

#[test]
fn net_zero_target_from_2050() {
    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();
    let result = ImoCalculator::new(&registry)
        .calculate("S1", 2050, &[ConsumptionRecord::new("LNG", 10.0)], &fuels)
        .unwrap();
    assert_eq!(result.target_kind, GfiTargetKind::NetZero);
    assert_eq!(result.target_gfi, 3.65);
}

#[test]
fn zero_mass_is_compliant_with_zero_gap() {
    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();
    let result = ImoCalculator::new(&registry)
        .calculate("S1", 2030, &[ConsumptionRecord::new("HFO", 0.0)], &fuels)
        .unwrap();
    assert_eq!(result.attained_gfi, 0.0);
    assert_eq!(result.gap_t, 0.0);
    assert_eq!(result.tier, Tier::Compliant);
}
