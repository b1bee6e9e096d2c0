use chrono::NaiveDate;

use seacomply_lib::error::Error;
use seacomply_lib::registry::builtin::builtin_constants;
use seacomply_lib::registry::keys;
use seacomply_lib::{ConstantRegistry, ConstantValue, Framework, RegulatoryConstant};

mod common;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn fixture_registry() -> ConstantRegistry {
    ConstantRegistry::from_path(&common::fixtures_dir().join("constants.json"))
        .expect("fixture constants load")
}

#[test]
fn bounded_constant_resolves_only_inside_its_interval() {
    let constant = RegulatoryConstant {
        key: "FUELEU_PENALTY_RATE_PER_GJ".to_string(),
        framework: Framework::FuelEu,
        value: ConstantValue::Scalar(58.5),
        effective_from: date(2025, 1, 1),
        effective_to: Some(date(2026, 1, 1)),
        version: "1.0.0".to_string(),
        source_regulation: "EU Regulation 2023/1805 Article 20".to_string(),
        source_url: None,
    };
    let registry = ConstantRegistry::from_constants([constant.clone()]).unwrap();

    let key = "FUELEU_PENALTY_RATE_PER_GJ";
    assert_eq!(registry.resolve(key, date(2025, 6, 1)), Some(&constant));
    assert_eq!(registry.resolve(key, date(2026, 6, 1)), None);
}

#[test]
fn json_table_resolves_successive_versions() {
    let registry = fixture_registry();
    assert_eq!(registry.len(), 5);

    let key = keys::EU_ETS_ALLOWANCE_PRICE_EUR;
    let old = registry.require(key, date(2025, 6, 1)).unwrap();
    assert_eq!(old.version, "1.0.0");
    assert_eq!(old.value, ConstantValue::Scalar(85.0));

    let new = registry.require(key, date(2026, 6, 1)).unwrap();
    assert_eq!(new.version, "1.1.0");
    assert_eq!(registry.scalar(key, date(2026, 6, 1)).unwrap(), 92.5);

    let phase_in = registry
        .year_table(keys::EU_ETS_PHASE_IN, date(2025, 12, 31))
        .unwrap();
    assert_eq!(phase_in.get(&2025), Some(&0.7));
}

#[test]
fn missing_constant_is_a_hard_error() {
    let registry = fixture_registry();
    let err = registry
        .scalar(keys::FUELEU_PENALTY_RATE_PER_GJ, date(2025, 6, 1))
        .expect_err("fixture has no FuelEU constants");
    match err {
        Error::MissingConstant { key, as_of } => {
            assert_eq!(key, keys::FUELEU_PENALTY_RATE_PER_GJ);
            assert_eq!(as_of, date(2025, 6, 1));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn constants_as_of_filters_by_date_and_framework() {
    let registry = fixture_registry();

    let eu_2025: Vec<&str> = registry
        .constants_as_of(date(2025, 6, 1), Some(Framework::EuEts))
        .into_iter()
        .map(|c| c.key.as_str())
        .collect();
    assert_eq!(
        eu_2025,
        vec![keys::EU_ETS_ALLOWANCE_PRICE_EUR, keys::EU_ETS_PHASE_IN]
    );

    assert_eq!(registry.constants_as_of(date(2026, 8, 1), None).len(), 4);
}

#[test]
fn list_by_framework_orders_by_key_then_date() {
    let registry = fixture_registry();
    let listed: Vec<(&str, NaiveDate)> = registry
        .list_by_framework(Framework::EuEts)
        .into_iter()
        .map(|c| (c.key.as_str(), c.effective_from))
        .collect();
    assert_eq!(
        listed,
        vec![
            (keys::EU_ETS_ALLOWANCE_PRICE_EUR, date(2025, 1, 1)),
            (keys::EU_ETS_ALLOWANCE_PRICE_EUR, date(2026, 1, 1)),
            (keys::EU_ETS_GWP_VALUES, date(2026, 1, 1)),
            (keys::EU_ETS_PHASE_IN, date(2024, 1, 1)),
        ]
    );
}

#[test]
fn builtin_table_carries_published_parameters() {
    let registry = common::builtin_registry();
    let end_2025 = date(2025, 12, 31);

    let targets = registry
        .fuel_eu_targets(keys::FUELEU_TARGETS, end_2025)
        .unwrap();
    assert_eq!(targets[&2025].target_intensity, 89.34);
    assert_eq!(targets[&2050].target_intensity, 18.23);

    let phase_in = registry.year_table(keys::EU_ETS_PHASE_IN, end_2025).unwrap();
    assert_eq!(phase_in[&2024], 0.40);
    assert_eq!(phase_in[&2025], 0.70);

    assert!(registry.resolve(keys::UK_ETS_GWP_VALUES, end_2025).is_none());
    let band = registry
        .price_range(keys::UK_ETS_PRICE_RANGE_GBP, date(2026, 12, 31))
        .unwrap();
    assert_eq!(band.midpoint(), 65.5);

    assert!(registry
        .resolve(keys::IMO_GFI_TARGETS, date(2027, 12, 31))
        .is_none());
}

#[test]
fn fingerprint_changes_when_a_value_changes() {
    let builtin = common::builtin_registry();
    let same = ConstantRegistry::from_constants(builtin_constants()).unwrap();
    assert_eq!(builtin.fingerprint(), same.fingerprint());

    let edited = builtin_constants().into_iter().map(|mut c| {
        if c.key == keys::EU_ETS_ALLOWANCE_PRICE_EUR {
            c.value = ConstantValue::Scalar(90.0);
        }
        c
    });
    let edited = ConstantRegistry::from_constants(edited).unwrap();
    assert_ne!(builtin.fingerprint(), edited.fingerprint());
}

#[test]
fn rejects_malformed_json() {
    let err = ConstantRegistry::from_reader("[{\"key\": 1}]".as_bytes()).expect_err("bad json");
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn informational_constants_agree_with_calculator_parameters() {
    use seacomply_lib::calc::constants::{RFNBO_INCENTIVE_YEARS, UK_ETS_LAUNCH};

    let registry = common::builtin_registry();
    let launch = registry
        .text(keys::UK_ETS_LAUNCH_DATE, date(2026, 12, 31))
        .expect("launch date present");
    assert_eq!(launch, UK_ETS_LAUNCH.to_string());
    assert!(registry
        .resolve(keys::UK_ETS_LAUNCH_DATE, UK_ETS_LAUNCH.pred_opt().expect("valid date"))
        .is_none());

    let first = *RFNBO_INCENTIVE_YEARS.start();
    let last = *RFNBO_INCENTIVE_YEARS.end();
    assert!(registry
        .resolve(keys::FUELEU_RFNBO_MULTIPLIER, date(first, 1, 1))
        .is_some());
    assert!(registry
        .resolve(keys::FUELEU_RFNBO_MULTIPLIER, date(last, 12, 31))
        .is_some());
    assert!(registry
        .resolve(keys::FUELEU_RFNBO_MULTIPLIER, date(last + 1, 1, 1))
        .is_none());

    let coverage = registry
        .require(keys::EU_ETS_VOYAGE_COVERAGE, date(2025, 6, 1))
        .unwrap();
    match &coverage.value {
        ConstantValue::Coverage(rows) => {
            assert_eq!(rows.get("intra_eu"), Some(&1.0));
            assert_eq!(rows.get("extra_eu"), Some(&0.5));
        }
        other => panic!("unexpected value: {:?}", other),
    }
}

#[test]
fn one_registry_is_shared_across_threads() {
    use seacomply_lib::{ConsumptionRecord, FuelEuCalculator, TradingCalculator};

    let registry = common::builtin_registry();
    let fuels = common::fixture_fuels();
    let records = [
        ConsumptionRecord::new("HFO", 640.0),
        ConsumptionRecord::new("LNG", 210.0),
    ];

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let fuel_eu = FuelEuCalculator::new(&registry)
                        .calculate("S1", 2026, &records, &fuels, None)
                        .unwrap();
                    let eu_ets = TradingCalculator::eu_ets(&registry)
                        .calculate("V1", 2026, 1.0, &records, &fuels, None)
                        .unwrap();
                    (fuel_eu, eu_ets)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker finished"))
            .collect()
    });

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| *r == results[0]));
}
