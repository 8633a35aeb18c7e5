//! CLI module for runtime-config
//!
//! - Argument parsing with clap
//! - Settings merging (CLI args over settings file and environment)
//! - Command dispatch to the load and resolve handlers

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, EnvironmentArg, SourceArgs};

use crate::config::Settings;
use crate::logger::init_logger;

/// Load settings and apply CLI overrides
///
/// # Errors
/// Returns error if loading, merging, or validation fails
pub fn load_and_merge_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::from_cli(cli)?;
    Ok(merger.merge_cli_args(cli)?)
}

/// Initialize the global logger from settings
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    init_logger(logger_config)?;
    Ok(())
}
