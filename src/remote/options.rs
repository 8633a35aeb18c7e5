//! Options for the configuration service

use crate::remote::fetch::ClientOptions;
use crate::remote::resolver::DEFAULT_BASE_URL;
use crate::remote::source::{SourceContext, UrlSource};

/// How and where the configuration service loads configuration from
#[derive(Debug, Clone)]
pub struct ConfigurationOptions {
    /// Where to fetch from; `None` loads the default `config.json`
    pub source: Option<UrlSource>,
    /// Base URL relative sources are joined against
    pub base_url: String,
    /// Context handed to source producers
    pub context: SourceContext,
    /// Emit the merged configuration to the log after loading
    pub log_configuration: bool,
    /// HTTP client options
    pub client: ClientOptions,
}

impl ConfigurationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source<S: Into<UrlSource>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_context(mut self, context: SourceContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_log_configuration(mut self, enabled: bool) -> Self {
        self.log_configuration = enabled;
        self
    }

    pub fn with_client(mut self, client: ClientOptions) -> Self {
        self.client = client;
        self
    }
}

impl Default for ConfigurationOptions {
    fn default() -> Self {
        Self {
            source: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            context: SourceContext::default(),
            log_configuration: false,
            client: ClientOptions::default(),
        }
    }
}
