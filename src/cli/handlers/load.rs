//! Load command handler
//!
//! Runs the full startup sequence and prints the merged configuration.

use std::io::Write;
use std::sync::Arc;

use crate::config::Settings;
use crate::remote::{Configuration, ConfigurationService};
use crate::startup::{InitializerRegistry, bootstrap};

pub struct LoadCommandHandler {
    settings: Settings,
}

impl LoadCommandHandler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Load the configuration and write it to `out` as pretty JSON
    ///
    /// # Errors
    /// - HTTP client construction errors
    /// - Any resolution, fetch or startup error
    pub async fn execute<W: Write>(&self, mut out: W) -> anyhow::Result<()> {
        let service: ConfigurationService<Configuration> =
            ConfigurationService::new(self.settings.configuration_options())?;

        let mut registry = InitializerRegistry::new();
        registry.register_sync("report", |config: Arc<Configuration>| {
            tracing::info!(
                keys = config.len(),
                names = ?config.keys().collect::<Vec<_>>(),
                "Configuration ready"
            );
            Ok(())
        });

        let configuration = bootstrap(&service, registry).await?;

        serde_json::to_writer_pretty(&mut out, &*configuration)?;
        writeln!(out)?;
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
