//! Calculate command handler.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use seacomply_cli::assessment;
use seacomply_cli::config::{load_fleet, load_fuels, load_registry};
use seacomply_cli::output::{render_assessment, OutputFormat};
use seacomply_lib::Framework;

/// Run one framework over a fleet-year request and print the results.
pub fn handle_calculate(
    constants: Option<&Path>,
    fuels: Option<&Path>,
    framework: Framework,
    input: &Path,
    format: OutputFormat,
    allowance_price: Option<f64>,
) -> Result<()> {
    let registry = load_registry(constants)?;
    let catalog = load_fuels(fuels)?;
    let fleet = load_fleet(input)?;

    info!(
        %framework,
        year = fleet.year,
        voyages = fleet.voyages.len(),
        fingerprint = %registry.fingerprint(),
        "running fleet-year calculation"
    );

    let result = assessment::run(framework, &registry, &catalog, &fleet, allowance_price)
        .with_context(|| format!("{framework} calculation failed for {}", fleet.year))?;

    match format {
        OutputFormat::Text => print!("{}", render_assessment(&result)),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&result).context("failed to serialize results")?;
            println!("{json}");
        }
    }
    Ok(())
}
