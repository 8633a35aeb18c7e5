use clap::Parser;

use runtime_config::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_settings(&cli)?;
    init_logger_from_settings(&settings)?;

    tracing::info!(
        app_name = %settings.application.name,
        version = %runtime_config::pkg_version(),
        environment = %settings.environment(),
        "Starting"
    );

    execute_command(&cli, settings, std::io::stdout().lock()).await
}
