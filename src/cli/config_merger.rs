//! Merging CLI arguments over loaded settings
//!
//! CLI arguments have the highest priority; settings loaded from the file
//! and environment provide the base.

use super::parser::{Cli, Commands, SourceArgs};
use crate::config::error::SettingsError;
use crate::config::{ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load base settings, honoring `--config` when given
    ///
    /// # Errors
    /// Returns SettingsError if loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, SettingsError> {
        let loader = match cli.config {
            Some(ref path) => ConfigLoader::new().with_config_file(path),
            None => ConfigLoader::new(),
        };

        Ok(Self::new(loader.load()?))
    }

    /// Apply CLI overrides and validate the result
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, SettingsError> {
        let mut config = self.base_config.clone();

        if let Some(env) = cli.env {
            config.application.environment = Some(env.into());
        }

        if let Some(level) = cli.log_level_override() {
            config.logger.level = level.to_string();
        }

        if let Some(ref command) = cli.command {
            Self::apply_source_overrides(&mut config, command.source());

            if let Commands::Load {
                log_config,
                timeout,
                ..
            } = command
            {
                if *log_config {
                    config.source.log_configuration = true;
                }
                if timeout.is_some() {
                    config.client.timeout = *timeout;
                }
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// CLI sources replace configured ones entirely rather than mixing
    fn apply_source_overrides(config: &mut Settings, source: &SourceArgs) {
        if !source.urls.is_empty() {
            config.source.urls = source.urls.clone();
            config.source.layered_dir = None;
        }

        if let Some(ref dir) = source.layered {
            config.source.layered_dir = Some(dir.clone());
            config.source.urls.clear();
        }

        if let Some(ref base_url) = source.base_url {
            config.source.base_url = base_url.clone();
        }
    }
}
