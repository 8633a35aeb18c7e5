//! Remote configuration loading
//!
//! Configuration is read from one or more JSON documents addressed by URL:
//! 1. The [`UrlSource`] is resolved to an ordered URL list (default `config.json`)
//! 2. Relative URLs are joined against the base URL
//! 3. All documents are fetched concurrently; any failure aborts the load
//! 4. Documents are merged shallowly, later ones overwriting earlier keys
//! 5. The merged mapping is turned into the configuration type and stored once

pub mod cell;
pub mod error;
pub mod fetch;
pub mod merge;
pub mod model;
pub mod options;
pub mod resolver;
pub mod service;
pub mod source;

#[cfg(test)]
pub(crate) mod test_support;

pub use cell::ConfigurationCell;
pub use error::{ConfigError, ConfigResult, FetchError};
pub use fetch::{ClientOptions, ConfigFetcher, HttpFetcher};
pub use merge::merge_documents;
pub use model::{ConfigJson, Configuration, FromConfigJson};
pub use options::ConfigurationOptions;
pub use resolver::{DEFAULT_BASE_URL, UrlResolver, has_scheme, is_absolute};
pub use service::ConfigurationService;
pub use source::{DEFAULT_CONFIG_URL, SourceContext, UrlProducer, UrlSource};
