//! Settings validation

use crate::config::error::SettingsError;
use crate::config::settings::{ClientSettings, LoggerSettings, Settings, SourceSettings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl SourceSettings {
    /// Validate source settings
    ///
    /// # Validation Rules
    /// - `urls` and `layered_dir` cannot both be set
    /// - URLs must not be empty
    /// - Base URL must not be empty
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.urls.is_empty() && self.layered_dir.is_some() {
            return Err(SettingsError::mutual_exclusivity(
                "source.urls and source.layered_dir cannot both be set. \
                 Use source.urls for an explicit list or source.layered_dir \
                 for common + environment documents.",
            ));
        }

        if let Some(index) = self.urls.iter().position(|url| url.trim().is_empty()) {
            return Err(SettingsError::validation(
                format!("source.urls[{index}]"),
                "URL cannot be empty.".to_string(),
            ));
        }

        if self.base_url.trim().is_empty() {
            return Err(SettingsError::validation(
                "source.base_url",
                "Base URL cannot be empty. Use \"/\" for the root.",
            ));
        }

        Ok(())
    }
}

impl ClientSettings {
    /// Validate client settings
    ///
    /// Timeouts, when set, must be greater than 0 seconds.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.timeout == Some(0) {
            return Err(SettingsError::validation(
                "client.timeout",
                "Timeout must be greater than 0 seconds. Omit it to disable the timeout.",
            ));
        }

        if self.connect_timeout == Some(0) {
            return Err(SettingsError::validation(
                "client.connect_timeout",
                "Connect timeout must be greater than 0 seconds. Omit it to disable the timeout.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(SettingsError::validation(
                "logger.level".to_string(),
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
            return Err(SettingsError::validation(
                "logger.file.format".to_string(),
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.file.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(SettingsError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(SettingsError::validation(
                "logger.file.path",
                "File path cannot be empty when file output is enabled.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all settings sections
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.source.validate()?;
        self.client.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_urls_and_layered_dir_are_exclusive() {
        let mut settings = Settings::default();
        settings.source.urls = vec!["a.json".to_string()];
        settings.source.layered_dir = Some("config".to_string());

        match settings.validate() {
            Err(SettingsError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("source.urls"));
                assert!(msg.contains("source.layered_dir"));
            }
            other => panic!("Expected MutualExclusivityError, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_url_is_rejected() {
        let mut settings = Settings::default();
        settings.source.urls = vec!["a.json".to_string(), " ".to_string()];

        match settings.validate() {
            Err(SettingsError::ValidationError { field, .. }) => assert_eq!(field, "source.urls[1]"),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut settings = Settings::default();
        settings.client.timeout = Some(0);
        assert!(settings.validate().is_err());

        settings.client.timeout = Some(10);
        settings.client.connect_timeout = Some(0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_logger_rules() {
        let mut settings = Settings::default();
        settings.logger.level = "WARN".to_string();
        assert!(settings.validate().is_ok());

        settings.logger.console.enabled = false;
        assert!(settings.validate().is_err());

        settings.logger.file.enabled = true;
        assert!(settings.validate().is_ok());

        settings.logger.file.path = String::new();
        assert!(settings.validate().is_err());
    }
}
