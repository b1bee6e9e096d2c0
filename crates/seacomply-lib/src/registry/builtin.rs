//! Regulatory constants shipped with the library.
//!
//! Sources: EU Regulation 2023/1805 (FuelEU Maritime), EU Regulation 2023/957
//! (maritime EU ETS), IMO 2023 GHG Strategy / GHG Fuel Standard, UK ETS
//! Authority guidance. Allowance prices are market references, not
//! authoritative values.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::keys::*;
use super::{
    ConstantRegistry, ConstantValue, Framework, FuelEuTarget, GfiMilestone, GwpValues, PriceRange,
    RegulatoryConstant,
};
use crate::error::Result;
use crate::period::ymd;

const TABLE_VERSION: &str = "1.0.0";

const FUELEU_REG: &str = "EU Regulation 2023/1805";
const EU_ETS_REG: &str = "EU Regulation 2023/957";
const IMO_STRATEGY: &str = "IMO 2023 Strategy (MEPC 80)";
const IMO_FUEL_STANDARD: &str = "IMO GHG Fuel Standard";
const UK_ETS_AUTHORITY: &str = "UK ETS Authority";

const FROM_2024: NaiveDate = ymd(2024, 1, 1);
const FROM_2025: NaiveDate = ymd(2025, 1, 1);
const FROM_2027: NaiveDate = ymd(2027, 1, 1);
const FROM_2028: NaiveDate = ymd(2028, 1, 1);
const FROM_2030: NaiveDate = ymd(2030, 1, 1);
const RFNBO_WINDOW_END: NaiveDate = ymd(2034, 1, 1);
const UK_ETS_LAUNCH: NaiveDate = ymd(2026, 7, 1);
const MULTI_GHG_2026: NaiveDate = ymd(2026, 1, 1);

impl ConstantRegistry {
    /// Registry populated with the built-in constant table.
    pub fn builtin() -> Result<Self> {
        Self::from_constants(builtin_constants())
    }
}

struct Entry {
    key: &'static str,
    framework: Framework,
    value: ConstantValue,
    from: NaiveDate,
    to: Option<NaiveDate>,
    source: &'static str,
    url: Option<&'static str>,
}

impl Entry {
    fn new(
        key: &'static str,
        framework: Framework,
        value: ConstantValue,
        from: NaiveDate,
        source: &'static str,
    ) -> Self {
        Self {
            key,
            framework,
            value,
            from,
            to: None,
            source,
            url: None,
        }
    }

    fn until(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    fn url(mut self, url: &'static str) -> Self {
        self.url = Some(url);
        self
    }

    fn build(self) -> RegulatoryConstant {
        RegulatoryConstant {
            key: self.key.to_string(),
            framework: self.framework,
            value: self.value,
            effective_from: self.from,
            effective_to: self.to,
            version: TABLE_VERSION.to_string(),
            source_regulation: self.source.to_string(),
            source_url: self.url.map(str::to_string),
        }
    }
}

fn year_table(rows: &[(i32, f64)]) -> ConstantValue {
    ConstantValue::YearTable(rows.iter().copied().collect())
}

fn coverage(rows: &[(&str, f64)]) -> ConstantValue {
    ConstantValue::Coverage(
        rows.iter()
            .map(|(name, pct)| (name.to_string(), *pct))
            .collect(),
    )
}

fn ar4_gwp() -> ConstantValue {
    ConstantValue::Gwp(GwpValues {
        co2: 1.0,
        ch4: 25.0,
        n2o: 298.0,
    })
}

fn fuel_eu_targets() -> ConstantValue {
    let rows = [
        (2025, 0.02, 89.34),
        (2026, 0.06, 85.69),
        (2027, 0.06, 85.69),
        (2028, 0.08, 83.87),
        (2029, 0.10, 82.04),
        (2030, 0.06, 85.69),
        (2035, 0.145, 77.94),
        (2040, 0.31, 62.90),
        (2045, 0.62, 34.64),
        (2050, 0.80, 18.23),
    ];
    ConstantValue::FuelEuTargets(
        rows.into_iter()
            .map(|(year, reduction, target_intensity)| {
                (
                    year,
                    FuelEuTarget {
                        reduction,
                        target_intensity,
                    },
                )
            })
            .collect(),
    )
}

fn gfi_targets() -> ConstantValue {
    let mut milestones = BTreeMap::new();
    milestones.insert(
        2030,
        GfiMilestone {
            reduction: 0.20,
            aspirational: Some(0.30),
            target_gfi: 72.93,
        },
    );
    milestones.insert(
        2040,
        GfiMilestone {
            reduction: 0.70,
            aspirational: Some(0.80),
            target_gfi: 27.35,
        },
    );
    milestones.insert(
        2050,
        GfiMilestone {
            reduction: 0.96,
            aspirational: None,
            target_gfi: 3.65,
        },
    );
    ConstantValue::GfiTargets(milestones)
}

/// The built-in constant table, in declaration order.
pub fn builtin_constants() -> Vec<RegulatoryConstant> {
    use ConstantValue::{Scalar, Text};
    use Framework::{EuEts, FuelEu, Imo, UkEts};

    let entries = vec![
        // FuelEU Maritime
        Entry::new(FUELEU_BASELINE_INTENSITY, FuelEu, Scalar(91.16), FROM_2025, FUELEU_REG)
            .url("https://eur-lex.europa.eu/eli/reg/2023/1805/oj"),
        Entry::new(
            FUELEU_TARGETS,
            FuelEu,
            fuel_eu_targets(),
            FROM_2025,
            "EU Regulation 2023/1805 Annex I",
        ),
        Entry::new(
            FUELEU_PENALTY_RATE_PER_GJ,
            FuelEu,
            Scalar(58.50),
            FROM_2025,
            "EU Regulation 2023/1805 Article 20",
        ),
        Entry::new(
            FUELEU_PENALTY_RATE_PER_TONNE_CO2EQ,
            FuelEu,
            Scalar(2400.0),
            FROM_2025,
            "EU Regulation 2023/1805 Article 20",
        ),
        Entry::new(
            FUELEU_BANKING_LIMIT_PCT,
            FuelEu,
            Scalar(0.02),
            FROM_2025,
            "EU Regulation 2023/1805 Article 19",
        ),
        Entry::new(
            FUELEU_BORROWING_LIMIT_PCT,
            FuelEu,
            Scalar(0.02),
            FROM_2025,
            "EU Regulation 2023/1805 Article 19",
        ),
        Entry::new(
            FUELEU_RFNBO_MULTIPLIER,
            FuelEu,
            Scalar(0.5),
            FROM_2025,
            "EU Regulation 2023/1805 Article 9",
        )
        .until(RFNBO_WINDOW_END),
        Entry::new(FUELEU_WIND_ASSIST_FACTOR, FuelEu, Scalar(1.0), FROM_2025, FUELEU_REG),
        Entry::new(
            FUELEU_OPS_COVERAGE_PCT,
            FuelEu,
            Scalar(0.9),
            FROM_2030,
            "EU Regulation 2023/1805 Article 10",
        ),
        Entry::new(
            FUELEU_OPS_PENALTY_PER_KWH_EUR,
            FuelEu,
            Scalar(10.0),
            FROM_2025,
            "EU Regulation 2023/1805 Article 23",
        ),
        // EU ETS
        Entry::new(
            EU_ETS_PHASE_IN,
            EuEts,
            year_table(&[(2024, 0.40), (2025, 0.70), (2026, 1.00), (2027, 1.00)]),
            FROM_2024,
            EU_ETS_REG,
        ),
        Entry::new(
            EU_ETS_VOYAGE_COVERAGE,
            EuEts,
            coverage(&[("extra_eu", 0.5), ("intra_eu", 1.0)]),
            FROM_2024,
            EU_ETS_REG,
        ),
        Entry::new(
            EU_ETS_ALLOWANCE_PRICE_EUR,
            EuEts,
            Scalar(85.0),
            FROM_2024,
            "Market Price Reference",
        ),
        Entry::new(
            EU_ETS_EMISSION_FACTOR_HFO,
            EuEts,
            Scalar(3.114),
            FROM_2024,
            "EU Regulation 2023/957 Annex II",
        ),
        Entry::new(
            EU_ETS_GWP_VALUES,
            EuEts,
            ar4_gwp(),
            MULTI_GHG_2026,
            "EU Regulation 2023/957 Multi-GHG Expansion",
        ),
        Entry::new(
            EU_ETS_SURRENDER_DEADLINE,
            EuEts,
            Text("04-30".to_string()),
            FROM_2024,
            EU_ETS_REG,
        ),
        // IMO Net-Zero Framework
        Entry::new(IMO_GFI_TARGETS, Imo, gfi_targets(), FROM_2028, IMO_STRATEGY),
        Entry::new(IMO_TIER1_PRICE_EUR, Imo, Scalar(100.0), FROM_2028, IMO_FUEL_STANDARD),
        Entry::new(IMO_TIER2_PRICE_EUR, Imo, Scalar(380.0), FROM_2028, IMO_FUEL_STANDARD),
        Entry::new(
            IMO_ZNZ_THRESHOLDS,
            Imo,
            year_table(&[(2028, 19.0), (2035, 14.0)]),
            FROM_2028,
            IMO_FUEL_STANDARD,
        ),
        Entry::new(IMO_SURPLUS_VALIDITY_YEARS, Imo, Scalar(2.0), FROM_2028, IMO_FUEL_STANDARD),
        Entry::new(
            IMO_REGISTRY_OPENING,
            Imo,
            Text("2027-01-01".to_string()),
            FROM_2027,
            IMO_FUEL_STANDARD,
        ),
        // UK ETS
        Entry::new(
            UK_ETS_LAUNCH_DATE,
            UkEts,
            Text("2026-07-01".to_string()),
            UK_ETS_LAUNCH,
            UK_ETS_AUTHORITY,
        ),
        Entry::new(
            UK_ETS_COVERAGE,
            UkEts,
            coverage(&[("uk_domestic", 1.0), ("uk_international_port", 1.0)]),
            UK_ETS_LAUNCH,
            UK_ETS_AUTHORITY,
        ),
        Entry::new(
            UK_ETS_PRICE_RANGE_GBP,
            UkEts,
            ConstantValue::PriceRange(PriceRange {
                min: 31.0,
                max: 100.0,
                reserve: Some(22.0),
            }),
            UK_ETS_LAUNCH,
            UK_ETS_AUTHORITY,
        ),
        Entry::new(
            UK_ETS_MARKET_SIZE_ALLOWANCES,
            UkEts,
            Scalar(2_000_000.0),
            UK_ETS_LAUNCH,
            UK_ETS_AUTHORITY,
        ),
        Entry::new(
            UK_ETS_SURRENDER_DEADLINE,
            UkEts,
            Text("04-30".to_string()),
            FROM_2027,
            UK_ETS_AUTHORITY,
        ),
        Entry::new(UK_ETS_GWP_VALUES, UkEts, ar4_gwp(), UK_ETS_LAUNCH, UK_ETS_AUTHORITY),
        Entry::new(
            UK_ETS_VESSEL_THRESHOLD_GT,
            UkEts,
            Scalar(5000.0),
            UK_ETS_LAUNCH,
            UK_ETS_AUTHORITY,
        ),
    ];

    entries.into_iter().map(Entry::build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_builds_without_overlaps() {
        let registry = ConstantRegistry::builtin().expect("builtin table is valid");
        assert_eq!(registry.len(), builtin_constants().len());
        for framework in Framework::ALL {
            assert!(!registry.list_by_framework(framework).is_empty());
        }
    }

    #[test]
    fn rfnbo_multiplier_covers_2033_but_not_2034() {
        let registry = ConstantRegistry::builtin().unwrap();
        assert!(registry
            .resolve(FUELEU_RFNBO_MULTIPLIER, ymd(2033, 12, 31))
            .is_some());
        assert!(registry
            .resolve(FUELEU_RFNBO_MULTIPLIER, ymd(2034, 1, 1))
            .is_none());
    }

    #[test]
    fn ops_coverage_only_from_2030() {
        let registry = ConstantRegistry::builtin().unwrap();
        assert!(registry
            .resolve(FUELEU_OPS_COVERAGE_PCT, ymd(2029, 12, 31))
            .is_none());
        assert_eq!(
            registry
                .scalar(FUELEU_OPS_COVERAGE_PCT, ymd(2030, 1, 1))
                .unwrap(),
            0.9
        );
    }
}
