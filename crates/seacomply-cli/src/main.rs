use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use seacomply_cli::logging::{init_logging, LoggingConfig};
use seacomply_cli::output::OutputFormat;
use seacomply_lib::Framework;

mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "Maritime decarbonization compliance calculations")]
struct Cli {
    /// Regulatory constants JSON file (overrides SEACOMPLY_CONSTANTS).
    #[arg(long, global = true)]
    constants: Option<PathBuf>,

    /// Fuel catalog CSV file (overrides SEACOMPLY_FUELS).
    #[arg(long, global = true)]
    fuels: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List regulatory constants.
    Constants {
        /// Only constants of this framework (fuel-eu, eu-ets, uk-ets, imo).
        #[arg(long, value_parser = parse_framework)]
        framework: Option<Framework>,
        /// Only constants in force on this date (YYYY-MM-DD).
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the constant in force for a key on a date.
    Resolve {
        /// Constant key, e.g. EU_ETS_PHASE_IN.
        key: String,
        /// Date to resolve for (YYYY-MM-DD).
        #[arg(long, value_parser = parse_date)]
        as_of: NaiveDate,
    },
    /// List the fuels in the active catalog.
    Fuels {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run one framework's calculator over a fleet-year request file.
    Calculate {
        /// fuel-eu, eu-ets, uk-ets or imo.
        #[arg(long, value_parser = parse_framework)]
        framework: Framework,
        /// Fleet-year request (JSON).
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Allowance price overriding the registry reference (trading schemes only).
        #[arg(long)]
        allowance_price: Option<f64>,
    },
}

fn parse_framework(s: &str) -> std::result::Result<Framework, String> {
    s.parse::<Framework>().map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::from_env().verbose(cli.verbose));

    let constants = cli.constants.as_deref();
    let fuels = cli.fuels.as_deref();

    match cli.command {
        Command::Constants {
            framework,
            as_of,
            format,
        } => commands::constants::handle_list(constants, framework, as_of, format),
        Command::Resolve { key, as_of } => {
            commands::constants::handle_resolve(constants, &key, as_of)
        }
        Command::Fuels { format } => commands::fuels::handle_list_fuels(fuels, format),
        Command::Calculate {
            framework,
            input,
            format,
            allowance_price,
        } => commands::calculate::handle_calculate(
            constants,
            fuels,
            framework,
            &input,
            format,
            allowance_price,
        ),
    }
}
