use std::fs::File;

use seacomply_lib::error::Error;
use seacomply_lib::{
    aggregate_annual, assess_eu_ets, assess_fuel_eu, assess_imo, assess_uk_ets, AnnualAggregate,
    ConsumptionRecord, Framework, FleetYear, TradingCalculator,
};

mod common;
use common::assert_close;

fn fixture_fleet() -> FleetYear {
    let file = File::open(common::fixtures_dir().join("fleet_2026.json")).expect("open fleet");
    serde_json::from_reader(file).expect("parse fleet fixture")
}

#[test]
fn eu_ets_fleet_year_sums_voyages() {
    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();

    let assessment = assess_eu_ets(&registry, &fuels, &fixture_fleet(), None).unwrap();

    assert_eq!(assessment.results.len(), 3);
    let coverages: Vec<f64> = assessment.results.iter().map(|r| r.coverage).collect();
    assert_eq!(coverages, vec![1.0, 0.5, 0.0]);

    let annual = &assessment.annual;
    assert_eq!(annual.framework, Some(Framework::EuEts));
    assert_eq!(annual.result_count, 3);
    assert_close(annual.total_allowances, 1_584.445 + 556.556 * 0.5);
    assert_close(annual.total_cost, (1_584.445 + 556.556 * 0.5) * 85.0);
    assert_close(annual.total_emissions_t, 1_584.445 + 556.556 + 165.0);
}

#[test]
fn uk_ets_fleet_year_uses_explicit_coverage() {
    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();

    let assessment = assess_uk_ets(&registry, &fuels, &fixture_fleet(), None).unwrap();

    assert_close(assessment.annual.total_allowances, 165.0);
    assert_close(assessment.annual.total_cost, 165.0 * 65.5);
    let skipped = assessment.results[2]
        .records
        .iter()
        .filter(|r| !r.is_included())
        .count();
    assert_eq!(skipped, 1);
}

#[test]
fn vessel_frameworks_group_voyages_per_vessel() {
    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();
    let fleet = fixture_fleet();

    let fuel_eu = assess_fuel_eu(&registry, &fuels, &fleet).unwrap();
    let vessels: Vec<&str> = fuel_eu
        .results
        .iter()
        .map(|r| r.subject_id.as_str())
        .collect();
    assert_eq!(vessels, vec!["IMO9321483", "IMO9744001"]);
    // HFO and LNG (3.1% slip) on one hull, energy-weighted.
    let hfo_gj = 500.0 * 40.2;
    let lng_gj = 200.0 * 48.0;
    let blended = (91.16 * hfo_gj + (11.5 + 56.9 * 0.969) * lng_gj) / (hfo_gj + lng_gj);
    assert_close(fuel_eu.results[0].attained_intensity, blended);
    assert!(!fuel_eu.results[0].is_deficit());
    assert!(!fuel_eu.results[1].is_deficit());
    assert_close(fuel_eu.results[1].rfnbo_incentive, 120.0 * 19.9 * 0.5);
    assert_eq!(fuel_eu.annual.total_cost, 0.0);

    let imo = assess_imo(&registry, &fuels, &fleet).unwrap();
    assert_eq!(imo.annual.result_count, 2);
    assert_eq!(imo.annual.total_cost, 0.0);
}

#[test]
fn aggregation_rejects_results_from_another_year() {
    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();
    let calculator = TradingCalculator::eu_ets(&registry);
    let records = [ConsumptionRecord::new("HFO", 10.0)];

    let results = [
        calculator
            .calculate("V1", 2026, 1.0, &records, &fuels, None)
            .unwrap(),
        calculator
            .calculate("V2", 2025, 1.0, &records, &fuels, None)
            .unwrap(),
    ];

    let err = aggregate_annual(2026, &results).expect_err("mixed years");
    match err {
        Error::MixedAggregate { expected, found } => {
            assert_eq!(expected, 2026);
            assert_eq!(found, 2025);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn aggregation_rejects_mixed_frameworks() {
    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();
    let records = [ConsumptionRecord::new("HFO", 10.0)];

    let eu = TradingCalculator::eu_ets(&registry)
        .calculate("V1", 2027, 1.0, &records, &fuels, None)
        .unwrap();
    let uk = TradingCalculator::uk_ets(&registry)
        .calculate("V1", 2027, 1.0, &records, &fuels, None)
        .unwrap();

    let mut annual = AnnualAggregate::empty(2027);
    annual.add(&eu).unwrap();
    assert!(matches!(annual.add(&uk), Err(Error::InvalidInput { .. })));
    assert_eq!(annual.result_count, 1);
}

#[test]
fn empty_input_aggregates_to_zero() {
    let annual = aggregate_annual::<seacomply_lib::ImoResult, _>(2030, &[]).unwrap();
    assert_eq!(annual, AnnualAggregate::empty(2030));
}
