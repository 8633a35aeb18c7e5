//! Settings loader for runtime-config
//!
//! Loads the tool's own settings with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::SettingsError;
use crate::config::settings::Settings;

/// Environment variable for a specific settings file
const CONFIG_FILE_ENV: &str = "RUNTIME_CONFIG_FILE";

/// Settings file picked up from the working directory when present
const DEFAULT_CONFIG_FILE: &str = "runtime-config.toml";

/// Environment variable prefix for settings overrides
const ENV_PREFIX: &str = "RUNTIME_CONFIG";

/// Separator for nested settings keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Loads [`Settings`] from a TOML file and the environment
///
/// Sources, lowest priority first:
/// 1. The settings file: `--config`, else `RUNTIME_CONFIG_FILE` (both
///    required to exist), else `runtime-config.toml` if present
/// 2. `RUNTIME_CONFIG_*` environment variables
#[derive(Debug)]
pub struct ConfigLoader {
    /// Explicit settings file; must exist
    config_file: Option<PathBuf>,
    /// Fallback settings file; optional
    default_file: PathBuf,
}

impl ConfigLoader {
    /// Create a loader reading `RUNTIME_CONFIG_FILE`
    pub fn new() -> Self {
        Self {
            config_file: std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from),
            default_file: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    /// Use `path` instead of any file named by the environment
    pub fn with_config_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// The explicit settings file, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load and validate settings
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit settings file does not exist
    /// - Parsing or deserialization fails
    /// - Validation fails
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            SettingsError::ParseError(format!("Failed to deserialize settings: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, SettingsError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref path) => Self::add_file_source(builder, path, true)?,
            None => Self::add_file_source(builder, &self.default_file, false)?,
        };

        // RUNTIME_CONFIG_SOURCE__BASE_URL -> source.base_url
        let builder = Self::add_env_source(builder);

        builder.build().map_err(SettingsError::from)
    }

    fn add_file_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, SettingsError> {
        if required && !path.exists() {
            return Err(SettingsError::file_not_found(format!(
                "Required settings file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    /// `RUNTIME_CONFIG_SOURCE__URLS` takes a comma-separated list
    fn add_env_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .list_separator(",")
                .with_list_parse_key("source.urls")
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Environment variables are process-wide
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn write_settings(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("runtime-config.toml");
        fs::write(&path, content).expect("Failed to write settings file");
        (temp_dir, path)
    }

    /// Restores touched environment variables on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_loader_reads_file_env_var() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set("RUNTIME_CONFIG_FILE", "/etc/runtime-config.toml");

        let loader = ConfigLoader::new();
        assert_eq!(
            loader.config_file(),
            Some(Path::new("/etc/runtime-config.toml"))
        );
    }

    #[test]
    fn test_missing_explicit_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove("RUNTIME_CONFIG_FILE");

        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new().with_config_file(temp_dir.path().join("nope.toml"));

        match loader.load() {
            Err(SettingsError::FileNotFound(msg)) => assert!(msg.contains("nope.toml")),
            other => panic!("Expected FileNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_without_any_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove("RUNTIME_CONFIG_FILE");
        env.remove("RUNTIME_CONFIG_SOURCE__URLS");
        env.remove("RUNTIME_CONFIG_SOURCE__BASE_URL");

        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader {
            config_file: None,
            default_file: temp_dir.path().join("runtime-config.toml"),
        };

        let settings = loader.load().expect("Should load defaults");
        assert_eq!(settings.source.base_url, "/");
        assert!(settings.source.urls.is_empty());
    }

    #[test]
    fn test_load_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove("RUNTIME_CONFIG_FILE");
        env.remove("RUNTIME_CONFIG_SOURCE__URLS");
        env.remove("RUNTIME_CONFIG_SOURCE__BASE_URL");

        let (_dir, path) = write_settings(
            r#"
[application]
environment = "production"

[source]
base_url = "https://app.example.com/"
urls = ["config.common.json", "config.production.json"]
log_configuration = true

[source.vars]
tenant = "acme"

[client]
timeout = 15

[logger]
level = "debug"

[logger.file]
enabled = true
format = "compact"
"#,
        );

        let settings = ConfigLoader::new()
            .with_config_file(&path)
            .load()
            .expect("Should load settings");

        assert_eq!(
            settings.application.environment,
            Some(crate::config::Environment::Production)
        );
        assert_eq!(settings.source.base_url, "https://app.example.com/");
        assert_eq!(
            settings.source.urls,
            vec!["config.common.json", "config.production.json"]
        );
        assert!(settings.source.log_configuration);
        assert_eq!(settings.source.vars.get("tenant").map(String::as_str), Some("acme"));
        assert_eq!(settings.client.timeout, Some(15));
        assert_eq!(settings.logger.level, "debug");
        assert!(settings.logger.file.enabled);
        assert_eq!(settings.logger.file.format, "compact");
        assert!(settings.logger.console.enabled);
    }

    #[test]
    fn test_env_vars_override_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove("RUNTIME_CONFIG_FILE");

        let (_dir, path) = write_settings(
            r#"
[source]
base_url = "https://app.example.com/"
urls = ["a.json"]
"#,
        );

        env.set("RUNTIME_CONFIG_SOURCE__BASE_URL", "http://localhost:4200/");
        env.set("RUNTIME_CONFIG_SOURCE__URLS", "common.json,local.json");

        let settings = ConfigLoader::new()
            .with_config_file(&path)
            .load()
            .expect("Should load settings");

        assert_eq!(settings.source.base_url, "http://localhost:4200/");
        assert_eq!(settings.source.urls, vec!["common.json", "local.json"]);
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove("RUNTIME_CONFIG_FILE");
        env.remove("RUNTIME_CONFIG_SOURCE__URLS");
        env.remove("RUNTIME_CONFIG_SOURCE__BASE_URL");

        let (_dir, path) = write_settings(
            r#"
[source]
urls = ["a.json"]
layered_dir = "config"
"#,
        );

        let result = ConfigLoader::new().with_config_file(&path).load();
        assert!(matches!(
            result,
            Err(SettingsError::MutualExclusivityError(_))
        ));
    }
}
