//! Settings of the runtime-config tool
//!
//! Not to be confused with the remote configuration it loads (see
//! [`crate::remote`]); these settings say where that configuration lives.
//!
//! # Priority (lowest to highest)
//! 1. `runtime-config.toml` (or the file given by `--config` / `RUNTIME_CONFIG_FILE`)
//! 2. `RUNTIME_CONFIG_*` environment variables
//! 3. Command-line flags

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::SettingsError;
pub use loader::ConfigLoader;
pub use settings::{ClientSettings, LoggerSettings, Settings, SourceSettings};
