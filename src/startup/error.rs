use thiserror::Error;

use crate::remote::ConfigError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration phase failed")]
    Configuration(#[from] ConfigError),

    #[error("Startup initializer '{name}' failed")]
    Initializer {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type StartupResult<T> = Result<T, StartupError>;
