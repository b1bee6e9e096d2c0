//! Text rendering for command output.

use std::fmt::Write as _;

use clap::ValueEnum;

use seacomply_lib::calc::Applicability;
use seacomply_lib::{AnnualAggregate, ConstantValue, FuelCatalog, RegulatoryConstant};

use crate::assessment::Assessment;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One-line summary of a constant's value.
pub fn describe_value(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Scalar(v) => format!("{v}"),
        ConstantValue::Text(s) => s.clone(),
        ConstantValue::YearTable(rows) => rows
            .iter()
            .map(|(year, v)| format!("{year}: {v}"))
            .collect::<Vec<_>>()
            .join(", "),
        ConstantValue::FuelEuTargets(rows) => rows
            .iter()
            .map(|(year, t)| format!("{year}: {}", t.target_intensity))
            .collect::<Vec<_>>()
            .join(", "),
        ConstantValue::GfiTargets(rows) => rows
            .iter()
            .map(|(year, m)| format!("{year}: {}", m.target_gfi))
            .collect::<Vec<_>>()
            .join(", "),
        ConstantValue::Gwp(gwp) => {
            format!("CO2 {} / CH4 {} / N2O {}", gwp.co2, gwp.ch4, gwp.n2o)
        }
        ConstantValue::PriceRange(range) => match range.reserve {
            Some(reserve) => format!("{}-{} (reserve {reserve})", range.min, range.max),
            None => format!("{}-{}", range.min, range.max),
        },
        ConstantValue::Coverage(rows) => rows
            .iter()
            .map(|(name, v)| format!("{name}: {v}"))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub fn render_constants(constants: &[&RegulatoryConstant]) -> String {
    if constants.is_empty() {
        return "No constants match.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Regulatory constants ({}):", constants.len());
    let _ = writeln!(
        out,
        "{:<38} {:<7} {:<10} {:<10} {:<7} Value",
        "Key", "Scheme", "From", "To", "Version"
    );
    for c in constants {
        let to = c
            .effective_to
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<38} {:<7} {:<10} {:<10} {:<7} {}",
            c.key,
            c.framework,
            c.effective_from,
            to,
            c.version,
            describe_value(&c.value)
        );
    }
    out
}

pub fn render_fuels(catalog: &FuelCatalog) -> String {
    let fuels = catalog.fuels_sorted();
    if fuels.is_empty() {
        return "No fuels available in catalog.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Available fuels ({}):", fuels.len());
    let _ = writeln!(
        out,
        "{:<14} {:<28} {:>8} {:>8} {:>8} {:>8}",
        "Code", "Name", "LCV", "TtW", "WtT", "CO2 t/t"
    );
    for fuel in fuels {
        let _ = writeln!(
            out,
            "{:<14} {:<28} {:>8.1} {:>8.2} {:>8.2} {:>8.3}",
            fuel.code,
            fuel.name,
            fuel.lcv_mj_kg,
            fuel.ttw_gco2e_mj,
            fuel.wtt_gco2e_mj,
            fuel.co2_factor_t
        );
    }
    out
}

fn status(applicability: &Applicability) -> String {
    match applicability {
        Applicability::InForce => "in force".to_string(),
        Applicability::NotInForce { effective_from } => {
            format!("not in force until {effective_from}")
        }
    }
}

fn render_annual(out: &mut String, annual: &AnnualAggregate, unit: &str) {
    let _ = writeln!(
        out,
        "Annual total {}: {} results, emissions {:.3} tCO2e, allowances {:.3}, cost {:.2} {unit}",
        annual.year,
        annual.result_count,
        annual.total_emissions_t,
        annual.total_allowances,
        annual.total_cost
    );
}

pub fn render_assessment(assessment: &Assessment) -> String {
    let mut out = String::new();
    match assessment {
        Assessment::FuelEu(a) => {
            for r in &a.results {
                let _ = writeln!(
                    out,
                    "{} {} [{}]: attained {:.2} vs target {:.2} gCO2e/MJ, balance {:.0} MJ, penalty {:.2} EUR, RFNBO incentive {:.1}",
                    r.subject_id,
                    r.year,
                    status(&r.applicability),
                    r.attained_intensity,
                    r.target_intensity,
                    r.compliance_balance,
                    r.penalty_eur,
                    r.rfnbo_incentive
                );
            }
            render_annual(&mut out, &a.annual, "EUR");
        }
        Assessment::Trading(a) => {
            let unit = a
                .results
                .first()
                .map(|r| format!("{:?}", r.currency).to_uppercase())
                .unwrap_or_default();
            for r in &a.results {
                let _ = writeln!(
                    out,
                    "{} {} {} [{}]: {:.3} tCO2e x phase-in {:.2} x coverage {:.2} = {:.3} allowances @ {:.2} = {:.2} {unit}",
                    r.subject_id,
                    r.framework,
                    r.year,
                    status(&r.applicability),
                    r.total_co2e_t,
                    r.phase_in,
                    r.coverage,
                    r.allowances,
                    r.allowance_price,
                    r.estimated_cost
                );
            }
            render_annual(&mut out, &a.annual, &unit);
        }
        Assessment::Imo(a) => {
            for r in &a.results {
                let _ = writeln!(
                    out,
                    "{} {} [{}]: attained GFI {:.2} vs target {:.2}, gap {:.3} tCO2e, tier {:?}, cost {:.2} EUR",
                    r.subject_id,
                    r.year,
                    status(&r.applicability),
                    r.attained_gfi,
                    r.target_gfi,
                    r.gap_t,
                    r.tier,
                    r.remedial_cost_eur
                );
            }
            render_annual(&mut out, &a.annual, "EUR");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use seacomply_lib::registry::{GwpValues, PriceRange};
    use std::collections::BTreeMap;

    #[test]
    fn describes_each_value_shape() {
        assert_eq!(describe_value(&ConstantValue::Scalar(58.5)), "58.5");
        assert_eq!(
            describe_value(&ConstantValue::YearTable(BTreeMap::from([
                (2024, 0.4),
                (2025, 0.7)
            ]))),
            "2024: 0.4, 2025: 0.7"
        );
        assert_eq!(
            describe_value(&ConstantValue::Gwp(GwpValues {
                co2: 1.0,
                ch4: 25.0,
                n2o: 298.0
            })),
            "CO2 1 / CH4 25 / N2O 298"
        );
        assert_eq!(
            describe_value(&ConstantValue::PriceRange(PriceRange {
                min: 31.0,
                max: 100.0,
                reserve: Some(22.0)
            })),
            "31-100 (reserve 22)"
        );
    }

    #[test]
    fn empty_constant_list_has_a_message() {
        assert_eq!(render_constants(&[]), "No constants match.\n");
    }
}
