//! Settings of the runtime-config tool itself
//!
//! These say where the remote configuration lives and how to log; they are
//! loaded from TOML and `RUNTIME_CONFIG_*` environment variables.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::environment::Environment;
use crate::config::error::SettingsError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
use crate::remote::{ClientOptions, ConfigurationOptions, DEFAULT_BASE_URL, SourceContext, UrlSource};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "runtime-config".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/runtime-config.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Environment used for layered sources; falls back to `RUNTIME_CONFIG_ENV`
    #[serde(default)]
    pub environment: Option<Environment>,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            environment: None,
        }
    }
}

// ============================================================================
// Configuration source
// ============================================================================

/// Where remote configuration documents are fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Document URLs in merge order
    #[serde(default)]
    pub urls: Vec<String>,

    /// Directory holding `config.common.json` and `config.{env}.json`
    ///
    /// Mutually exclusive with `urls`.
    #[serde(default)]
    pub layered_dir: Option<String>,

    /// Base URL relative document URLs are joined against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Log the merged configuration after loading
    #[serde(default)]
    pub log_configuration: bool,

    /// Variables made available to source producers
    #[serde(default)]
    pub vars: HashMap<String, String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            layered_dir: None,
            base_url: default_base_url(),
            log_configuration: false,
            vars: HashMap::new(),
        }
    }
}

impl SourceSettings {
    /// The source descriptor; `None` means the default document
    pub fn url_source(&self) -> Option<UrlSource> {
        if let Some(dir) = &self.layered_dir {
            return Some(UrlSource::environment_layers(dir.as_str()));
        }

        match self.urls.as_slice() {
            [] => None,
            [url] => Some(UrlSource::literal(url.as_str())),
            urls => Some(UrlSource::List(urls.to_vec())),
        }
    }
}

// ============================================================================
// HTTP client
// ============================================================================

/// HTTP client settings; timeouts are in seconds and unset by default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub timeout: Option<u64>,

    #[serde(default)]
    pub connect_timeout: Option<u64>,
}

impl ClientSettings {
    pub fn into_client_options(self) -> ClientOptions {
        ClientOptions {
            timeout: self.timeout.map(Duration::from_secs),
            connect_timeout: self.connect_timeout.map(Duration::from_secs),
            ..ClientOptions::default()
        }
    }
}

// ============================================================================
// Logger
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// "full", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: true,
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    pub fn into_logger_config(self) -> Result<LoggerConfig, SettingsError> {
        let format: LogFormat = self.file.format.parse().map_err(|e: crate::logger::LoggerError| {
            SettingsError::validation("logger.file.format".to_string(), e.to_string())
        })?;

        let config = LoggerConfig {
            console: ConsoleConfig {
                enabled: self.console.enabled,
                colored: self.console.colored,
            },
            file: FileConfig {
                enabled: self.file.enabled,
                path: PathBuf::from(self.file.path),
                append: self.file.append,
                format,
            },
            level: self.level,
        };

        config
            .validate()
            .map_err(|e| SettingsError::validation("logger".to_string(), e.to_string()))?;
        Ok(config)
    }
}

// ============================================================================
// Root
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub source: SourceSettings,

    #[serde(default)]
    pub client: ClientSettings,

    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Effective environment: explicit setting, else `RUNTIME_CONFIG_ENV`
    pub fn environment(&self) -> Environment {
        self.application
            .environment
            .unwrap_or_else(Environment::from_env)
    }

    /// Options for the remote configuration service
    pub fn configuration_options(&self) -> ConfigurationOptions {
        let context = self
            .source
            .vars
            .iter()
            .fold(SourceContext::new(self.environment()), |ctx, (k, v)| {
                ctx.with_var(k.as_str(), v.as_str())
            });

        ConfigurationOptions {
            source: self.source.url_source(),
            base_url: self.source.base_url.clone(),
            context,
            log_configuration: self.source.log_configuration,
            client: self.client.clone().into_client_options(),
        }
    }
}
