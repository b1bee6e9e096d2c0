use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("seacomply");
    cmd.env("RUST_LOG", "error")
        .env_remove("SEACOMPLY_CONSTANTS")
        .env_remove("SEACOMPLY_FUELS");
    cmd
}

#[test]
fn lists_builtin_constants_for_one_framework() {
    cli()
        .args(["constants", "--framework", "eu-ets"])
        .assert()
        .success()
        .stdout(contains("Regulatory constants ("))
        .stdout(contains("EU_ETS_PHASE_IN"))
        .stdout(contains("Fingerprint:"))
        .stdout(contains("FUELEU_PENALTY_RATE").not());
}

#[test]
fn constants_as_of_only_lists_versions_in_force() {
    cli()
        .arg("--constants")
        .arg(fixture("constants.json"))
        .args(["constants", "--as-of", "2025-06-30"])
        .assert()
        .success()
        .stdout(contains("Regulatory constants (2):"))
        .stdout(contains("1.0.0"))
        .stdout(contains("UK_ETS_PRICE_RANGE_GBP").not());
}

#[test]
fn resolves_the_version_in_force() {
    cli()
        .arg("--constants")
        .arg(fixture("constants.json"))
        .args(["resolve", "EU_ETS_ALLOWANCE_PRICE_EUR", "--as-of", "2026-06-01"])
        .assert()
        .success()
        .stdout(contains("92.5"))
        .stdout(contains("1.1.0"));
}

#[test]
fn resolving_an_unknown_key_fails() {
    cli()
        .args(["resolve", "NOT_A_CONSTANT", "--as-of", "2026-01-01"])
        .assert()
        .failure()
        .stderr(contains("NOT_A_CONSTANT"));
}

#[test]
fn constants_file_from_environment_is_used() {
    cli()
        .env("SEACOMPLY_CONSTANTS", fixture("constants.json"))
        .args(["resolve", "UK_ETS_PRICE_RANGE_GBP", "--as-of", "2026-07-01"])
        .assert()
        .success()
        .stdout(contains("\"max\": 80.0"));
}

#[test]
fn lists_fixture_fuels() {
    cli()
        .arg("--fuels")
        .arg(fixture("fuels.csv"))
        .arg("fuels")
        .assert()
        .success()
        .stdout(contains("Available fuels (3):"))
        .stdout(contains("E_METHANOL"))
        .stdout(contains("Heavy Fuel Oil"));
}

#[test]
fn calculates_eu_ets_fleet_year_as_json() {
    cli()
        .arg("--fuels")
        .arg(fixture("fuels.csv"))
        .args(["calculate", "--framework", "eu-ets", "--format", "json", "--input"])
        .arg(fixture("fleet_2026.json"))
        .assert()
        .success()
        .stdout(contains("\"total_allowances\""))
        .stdout(contains("\"V-001\""))
        .stdout(contains("\"currency\": \"EUR\""));
}

#[test]
fn calculates_fuel_eu_per_vessel_as_text() {
    cli()
        .arg("--fuels")
        .arg(fixture("fuels.csv"))
        .args(["calculate", "--framework", "fuel-eu", "--input"])
        .arg(fixture("fleet_2026.json"))
        .assert()
        .success()
        .stdout(contains("IMO9321483 2026 [in force]"))
        .stdout(contains("Annual total 2026: 2 results"));
}

#[test]
fn allowance_price_is_rejected_for_imo() {
    cli()
        .arg("--fuels")
        .arg(fixture("fuels.csv"))
        .args(["calculate", "--framework", "imo", "--allowance-price", "80", "--input"])
        .arg(fixture("fleet_2026.json"))
        .assert()
        .failure()
        .stderr(contains("does not apply"));
}

#[test]
fn allowance_price_override_applies_to_uk_ets() {
    let temp = tempdir().expect("create temp dir");
    let request = temp.path().join("uk.json");
    fs::write(
        &request,
        r#"{
  "year": 2027,
  "voyages": [
    {
      "voyage_id": "UK-1",
      "vessel_id": "IMO9000001",
      "departure": { "is_uk": true },
      "arrival": { "is_uk": true },
      "records": [{ "fuel_id": "HFO", "mass_tonnes": 100.0 }]
    }
  ]
}"#,
    )
    .expect("write request");

    cli()
        .arg("--fuels")
        .arg(fixture("fuels.csv"))
        .args(["calculate", "--framework", "uk-ets", "--allowance-price", "50"])
        .arg("--input")
        .arg(&request)
        .assert()
        .success()
        .stdout(contains("UK-1 UK_ETS 2027 [in force]"))
        .stdout(contains("@ 50.00"))
        .stdout(contains("GBP"));
}

#[test]
fn unreadable_request_file_fails() {
    let temp = tempdir().expect("create temp dir");
    let request = temp.path().join("broken.json");
    fs::write(&request, "{ not json").expect("write request");

    cli()
        .args(["calculate", "--framework", "imo", "--input"])
        .arg(&request)
        .assert()
        .failure()
        .stderr(contains("failed to parse request file"));
}

#[test]
fn unknown_framework_is_a_usage_error() {
    cli()
        .args(["constants", "--framework", "cii"])
        .assert()
        .failure();
}
