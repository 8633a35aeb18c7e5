//! Configuration value types

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::remote::error::{ConfigError, ConfigResult};

/// A fetched or merged configuration document
pub type ConfigJson = serde_json::Map<String, Value>;

/// Build a configuration value from the merged document
///
/// Implemented for every deserializable type, so fixed-shape configuration
/// records only need `#[derive(Deserialize)]`.
pub trait FromConfigJson: Sized {
    fn from_config_json(json: ConfigJson) -> ConfigResult<Self>;
}

impl<T> FromConfigJson for T
where
    T: DeserializeOwned,
{
    fn from_config_json(json: ConfigJson) -> ConfigResult<Self> {
        serde_json::from_value(Value::Object(json))
            .map_err(|source| ConfigError::Construct { source })
    }
}

/// Untyped configuration: string keys mapped to the merged values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    values: ConfigJson,
}

impl Configuration {
    pub fn new(values: ConfigJson) -> Self {
        Self { values }
    }

    /// String value for `key`; `None` if absent or not a string
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Raw JSON value for `key`
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_json(&self) -> &ConfigJson {
        &self.values
    }
}

impl From<ConfigJson> for Configuration {
    fn from(values: ConfigJson) -> Self {
        Self::new(values)
    }
}
