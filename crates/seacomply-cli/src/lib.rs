//! Seacomply CLI library.
//!
//! Loading of reference data, logging setup and output formatting shared by
//! the `seacomply` binary's subcommands.

pub mod assessment;
pub mod config;
pub mod logging;
pub mod output;
