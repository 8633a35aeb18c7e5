//! Remote configuration error types

use thiserror::Error;

/// Failure of a single configuration source fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection, TLS, timeout)
    #[error("Request to '{url}' failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("Request to '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Response body is not valid JSON
    #[error("Response from '{url}' is not valid JSON")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Response body is JSON but not an object
    #[error("Response from '{url}' is not a JSON object")]
    NotAnObject { url: String },

    /// Fetcher-specific failure
    #[error("Fetching '{url}' failed: {message}")]
    Other { url: String, message: String },
}

impl FetchError {
    /// URL of the source that failed
    pub fn url(&self) -> &str {
        match self {
            FetchError::Request { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::InvalidJson { url, .. }
            | FetchError::NotAnObject { url }
            | FetchError::Other { url, .. } => url,
        }
    }
}

/// Errors raised while resolving, loading or reading remote configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source descriptor yielded something other than a URL or a list of URLs
    #[error("Configuration source descriptor produced an unexpected value: {found}")]
    UnexpectedSource { found: String },

    /// The source producer itself failed
    #[error("Configuration source producer failed")]
    Producer {
        #[source]
        source: anyhow::Error,
    },

    /// A resolved URL has no scheme, so it cannot be requested
    #[error("Configuration URL '{url}' has no scheme; configure an absolute base URL (currently '{base_url}')")]
    NotFetchable { url: String, base_url: String },

    /// One of the configuration sources could not be fetched
    #[error("Failed to load configuration")]
    Load {
        #[source]
        source: FetchError,
    },

    /// The merged document could not be turned into the configuration type
    #[error("Failed to construct configuration from merged document")]
    Construct {
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    /// Configuration was read before a successful load
    #[error("Configuration has not been initialized")]
    Uninitialized,

    /// Configuration was written a second time
    #[error("Configuration has already been initialized")]
    AlreadyInitialized,
}

impl ConfigError {
    pub fn unexpected_source<S: Into<String>>(found: S) -> Self {
        ConfigError::UnexpectedSource {
            found: found.into(),
        }
    }

    /// Whether this error came from the fetch phase
    pub fn is_load_error(&self) -> bool {
        matches!(self, ConfigError::Load { .. })
    }
}

impl From<FetchError> for ConfigError {
    fn from(source: FetchError) -> Self {
        ConfigError::Load { source }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
