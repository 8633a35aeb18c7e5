//! Write-once holder for the loaded configuration

use std::sync::{Arc, OnceLock};

use crate::remote::error::{ConfigError, ConfigResult};

/// Single-assignment cell
///
/// Written once after a successful load; reads before that fail with
/// [`ConfigError::Uninitialized`] instead of returning a default.
#[derive(Debug)]
pub struct ConfigurationCell<T> {
    value: OnceLock<Arc<T>>,
}

impl<T> ConfigurationCell<T> {
    pub const fn new() -> Self {
        Self {
            value: OnceLock::new(),
        }
    }

    /// Store the configuration; fails if a value is already present
    pub fn set(&self, value: T) -> ConfigResult<Arc<T>> {
        let value = Arc::new(value);
        self.value
            .set(Arc::clone(&value))
            .map_err(|_| ConfigError::AlreadyInitialized)?;
        Ok(value)
    }

    pub fn get(&self) -> ConfigResult<Arc<T>> {
        self.value.get().cloned().ok_or(ConfigError::Uninitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<T> Default for ConfigurationCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
