//! Errors for the tool's own settings

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file not found
    #[error("Settings file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse settings
    #[error("Failed to parse settings: {0}")]
    ParseError(String),

    /// Validation error with field and message
    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// Mutually exclusive options were both set
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    #[error("Settings error: {0}")]
    Other(#[from] config::ConfigError),
}

impl SettingsError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        SettingsError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        SettingsError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        SettingsError::MutualExclusivityError(message.into())
    }
}
