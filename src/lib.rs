//! runtime-config
//!
//! Loads application configuration from one or more remote JSON documents,
//! merges them into a single value and gates startup until that succeeds.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod logger;
pub mod remote;
pub mod startup;

pub use remote::{Configuration, ConfigurationOptions, ConfigurationService, UrlSource};
pub use startup::{InitializerRegistry, bootstrap};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
