//! Constants command handlers.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use seacomply_cli::config::load_registry;
use seacomply_cli::output::{render_constants, OutputFormat};
use seacomply_lib::{Framework, RegulatoryConstant};

/// List constants, optionally restricted to a framework and to those in
/// force on a date.
pub fn handle_list(
    source: Option<&Path>,
    framework: Option<Framework>,
    as_of: Option<NaiveDate>,
    format: OutputFormat,
) -> Result<()> {
    let registry = load_registry(source)?;

    let constants: Vec<&RegulatoryConstant> = match (as_of, framework) {
        (Some(date), framework) => registry.constants_as_of(date, framework),
        (None, Some(framework)) => registry.list_by_framework(framework),
        (None, None) => registry.iter().collect(),
    };

    match format {
        OutputFormat::Text => {
            print!("{}", render_constants(&constants));
            println!("Fingerprint: {}", registry.fingerprint());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&constants)
                .context("failed to serialize constants")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Print the constant in force for `key` on `as_of` as JSON.
pub fn handle_resolve(source: Option<&Path>, key: &str, as_of: NaiveDate) -> Result<()> {
    let registry = load_registry(source)?;
    let constant = registry
        .require(key, as_of)
        .with_context(|| format!("failed to resolve {key}"))?;
    let json = serde_json::to_string_pretty(constant).context("failed to serialize constant")?;
    println!("{json}");
    Ok(())
}
