//! Configuration service
//!
//! Resolves the configured sources, fetches every document concurrently,
//! merges them in declaration order and stores the result exactly once.

use std::sync::Arc;

use futures::future::try_join_all;

use crate::remote::cell::ConfigurationCell;
use crate::remote::error::{ConfigError, ConfigResult};
use crate::remote::fetch::{ConfigFetcher, HttpFetcher};
use crate::remote::merge::merge_documents;
use crate::remote::model::FromConfigJson;
use crate::remote::options::ConfigurationOptions;
use crate::remote::resolver::{UrlResolver, has_scheme};
use crate::remote::source::{SourceContext, UrlSource};

/// Loads and holds the application configuration
pub struct ConfigurationService<T, F = HttpFetcher> {
    resolver: UrlResolver,
    source: Option<UrlSource>,
    context: SourceContext,
    log_configuration: bool,
    fetcher: F,
    cell: ConfigurationCell<T>,
}

impl<T> ConfigurationService<T, HttpFetcher>
where
    T: FromConfigJson,
{
    /// Create a service fetching over HTTP
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Client`] if the HTTP client cannot be built.
    pub fn new(options: ConfigurationOptions) -> ConfigResult<Self> {
        let fetcher = HttpFetcher::new(&options.client)?;
        Ok(Self::with_fetcher(options, fetcher))
    }
}

impl<T, F> ConfigurationService<T, F>
where
    T: FromConfigJson,
    F: ConfigFetcher,
{
    pub fn with_fetcher(options: ConfigurationOptions, fetcher: F) -> Self {
        let resolver = UrlResolver::new(options.base_url);
        let context = options.context.or_base_url(resolver.base_url());

        Self {
            resolver,
            source: options.source,
            context,
            log_configuration: options.log_configuration,
            fetcher,
            cell: ConfigurationCell::new(),
        }
    }

    /// Absolute URLs this service loads, in merge order
    pub async fn resolve_urls(&self) -> ConfigResult<Vec<String>> {
        self.resolver
            .resolve_urls(self.source.as_ref(), &self.context)
            .await
    }

    /// Load the configuration
    ///
    /// Protocol-relative URLs are requested with the base URL's scheme.
    /// All sources are fetched concurrently; the first failure aborts the
    /// load and leaves the configuration unset. Documents are merged in
    /// declaration order, later ones overwriting earlier keys.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnexpectedSource`] / [`ConfigError::Producer`] if the
    ///   source cannot be resolved; nothing is fetched in that case
    /// - [`ConfigError::NotFetchable`] if a resolved URL has no scheme, which
    ///   happens when relative sources meet a relative base URL; nothing is
    ///   fetched in that case
    /// - [`ConfigError::Load`] wrapping the first fetch failure
    /// - [`ConfigError::Construct`] if the merged document does not fit `T`
    /// - [`ConfigError::AlreadyInitialized`] on a second successful load
    pub async fn init(&self) -> ConfigResult<()> {
        if self.cell.is_initialized() {
            return Err(ConfigError::AlreadyInitialized);
        }

        let urls = self.resolve_urls().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to resolve configuration sources");
        })?;
        let targets: Vec<String> = urls
            .iter()
            .map(|url| self.resolver.fetch_target(url))
            .collect();
        if let Some(url) = targets.iter().find(|url| !has_scheme(url)) {
            let err = ConfigError::NotFetchable {
                url: url.clone(),
                base_url: self.resolver.base_url().to_string(),
            };
            tracing::error!(error = %err, "Configuration source is not fetchable");
            return Err(err);
        }
        tracing::debug!(urls = ?targets, "Fetching configuration sources");

        let documents = try_join_all(targets.iter().map(|url| self.fetcher.fetch(url)))
            .await
            .map_err(|source| {
                tracing::error!(url = %source.url(), error = %source, "Configuration source failed");
                ConfigError::Load { source }
            })?;

        let merged = merge_documents(documents);
        let keys = merged.len();

        if self.log_configuration {
            let rendered = serde_json::to_string(&merged).unwrap_or_default();
            tracing::info!(configuration = %rendered, "Merged configuration");
        }

        let configuration = T::from_config_json(merged).inspect_err(|e| {
            tracing::error!(error = %e, "Merged configuration does not match the expected shape");
        })?;
        self.cell.set(configuration)?;

        tracing::info!(sources = urls.len(), keys, "Configuration initialized");
        Ok(())
    }

    /// The loaded configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Uninitialized`] until [`init`](Self::init) has
    /// succeeded.
    pub fn configuration(&self) -> ConfigResult<Arc<T>> {
        self.cell.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.is_initialized()
    }

    pub fn resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    pub fn context(&self) -> &SourceContext {
        &self.context
    }
}
