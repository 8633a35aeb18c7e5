//! Command executor dispatching parsed CLI commands

use std::io::Write;

use super::handlers::{LoadCommandHandler, ResolveCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;

/// Execute the CLI command with merged settings, writing results to `out`
///
/// Without a subcommand the configuration is loaded.
pub async fn execute_command<W: Write>(cli: &Cli, settings: Settings, out: W) -> anyhow::Result<()> {
    tracing::debug!(
        command = ?cli.command.as_ref().map(command_name),
        environment = %settings.environment(),
        "Executing command"
    );

    match &cli.command {
        Some(Commands::Resolve { .. }) => ResolveCommandHandler::new(settings).execute(out).await,
        Some(Commands::Load { .. }) | None => LoadCommandHandler::new(settings).execute(out).await,
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Load { .. } => "load",
        Commands::Resolve { .. } => "resolve",
    }
}
