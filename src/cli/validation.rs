//! CLI argument validation functions
//!
//! Checks that go beyond what clap can validate automatically.

use std::fs;
use std::path::PathBuf;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Settings file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Settings path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read settings file '{}': {}", path_str, e)),
    }
}

/// Validate a URL argument is non-empty and free of whitespace
pub fn validate_url(url_str: &str) -> Result<String, String> {
    let url = url_str.trim();

    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if url.chars().any(char::is_whitespace) {
        return Err(format!("URL cannot contain whitespace: '{}'", url_str));
    }

    Ok(url.to_string())
}

/// Validate a timeout in whole seconds, between 1 and 3600
pub fn validate_timeout(timeout_str: &str) -> Result<u64, String> {
    let timeout: u64 = timeout_str
        .parse()
        .map_err(|_| format!("Timeout must be a whole number of seconds, got: '{}'", timeout_str))?;

    if timeout == 0 {
        return Err("Timeout must be greater than 0. Omit --timeout to disable it.".to_string());
    }

    if timeout > 3600 {
        return Err("Timeout cannot exceed 3600 seconds".to_string());
    }

    Ok(timeout)
}
