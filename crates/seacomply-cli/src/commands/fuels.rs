//! Fuels command handler.

use std::path::Path;

use anyhow::{Context, Result};

use seacomply_cli::config::load_fuels;
use seacomply_cli::output::{render_fuels, OutputFormat};

/// List the fuels of the active catalog.
pub fn handle_list_fuels(source: Option<&Path>, format: OutputFormat) -> Result<()> {
    let catalog = load_fuels(source)?;
    match format {
        OutputFormat::Text => print!("{}", render_fuels(&catalog)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&catalog.fuels_sorted())
                .context("failed to serialize fuels")?;
            println!("{json}");
        }
    }
    Ok(())
}
