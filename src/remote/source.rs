//! Configuration source descriptors
//!
//! A source says where configuration documents live: a single URL, an ordered
//! list of URLs, or a producer that computes either from the runtime context.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Value, json};

use crate::config::Environment;
use crate::remote::error::{ConfigError, ConfigResult};

/// URL used when no source is configured
pub const DEFAULT_CONFIG_URL: &str = "config.json";

/// Runtime context handed to source producers
#[derive(Debug, Clone, Default)]
pub struct SourceContext {
    environment: Environment,
    base_url: String,
    vars: HashMap<String, String>,
}

impl SourceContext {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Default::default()
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the base URL unless one is already present
    pub fn or_base_url(self, base_url: &str) -> Self {
        if self.base_url.is_empty() {
            self.with_base_url(base_url)
        } else {
            self
        }
    }

    /// Attach a host-defined variable producers can look up
    pub fn with_var<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

type SyncProducer = dyn Fn(&SourceContext) -> anyhow::Result<Value> + Send + Sync;
type AsyncProducer =
    dyn Fn(SourceContext) -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync;

/// Function computing the source URLs at startup
///
/// The produced value must be a JSON string or an array of JSON strings;
/// anything else is rejected during resolution.
#[derive(Clone)]
pub enum UrlProducer {
    Sync(Arc<SyncProducer>),
    Async(Arc<AsyncProducer>),
}

impl UrlProducer {
    pub fn sync<F>(producer: F) -> Self
    where
        F: Fn(&SourceContext) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        UrlProducer::Sync(Arc::new(producer))
    }

    pub fn future<F, Fut>(producer: F) -> Self
    where
        F: Fn(SourceContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        UrlProducer::Async(Arc::new(move |ctx| producer(ctx).boxed()))
    }

    /// Run the producer, awaiting it if it is asynchronous
    pub async fn produce(&self, ctx: &SourceContext) -> anyhow::Result<Value> {
        match self {
            UrlProducer::Sync(producer) => producer(ctx),
            UrlProducer::Async(producer) => producer(ctx.clone()).await,
        }
    }
}

impl fmt::Debug for UrlProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlProducer::Sync(_) => f.write_str("UrlProducer::Sync"),
            UrlProducer::Async(_) => f.write_str("UrlProducer::Async"),
        }
    }
}

/// Where configuration documents are fetched from
#[derive(Debug, Clone)]
pub enum UrlSource {
    /// A single URL
    Literal(String),
    /// URLs in merge order
    List(Vec<String>),
    /// URLs computed at startup
    Producer(UrlProducer),
}

impl UrlSource {
    pub fn literal<S: Into<String>>(url: S) -> Self {
        UrlSource::Literal(url.into())
    }

    pub fn list<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UrlSource::List(urls.into_iter().map(Into::into).collect())
    }

    /// Common document followed by the environment-specific one
    ///
    /// Resolves to `{dir}/config.common.json` and `{dir}/config.{env}.json`,
    /// where `env` comes from the [`SourceContext`].
    pub fn environment_layers<S: Into<String>>(dir: S) -> Self {
        let dir = dir.into();
        let prefix = match dir.trim_end_matches('/') {
            "" if dir.starts_with('/') => "/".to_string(),
            "" => String::new(),
            trimmed => format!("{trimmed}/"),
        };

        UrlSource::Producer(UrlProducer::sync(move |ctx| {
            Ok(json!([
                format!("{prefix}config.common.json"),
                format!("{prefix}config.{}.json", ctx.environment().as_str()),
            ]))
        }))
    }

    /// Expand this source into its ordered URL list
    pub async fn urls(&self, ctx: &SourceContext) -> ConfigResult<Vec<String>> {
        match self {
            UrlSource::Literal(url) => Ok(vec![url.clone()]),
            UrlSource::List(urls) => Ok(urls.clone()),
            UrlSource::Producer(producer) => {
                let value = producer
                    .produce(ctx)
                    .await
                    .map_err(|source| ConfigError::Producer { source })?;
                urls_from_value(value)
            }
        }
    }
}

impl From<&str> for UrlSource {
    fn from(url: &str) -> Self {
        UrlSource::Literal(url.to_string())
    }
}

impl From<String> for UrlSource {
    fn from(url: String) -> Self {
        UrlSource::Literal(url)
    }
}

impl From<Vec<String>> for UrlSource {
    fn from(urls: Vec<String>) -> Self {
        UrlSource::List(urls)
    }
}

impl From<UrlProducer> for UrlSource {
    fn from(producer: UrlProducer) -> Self {
        UrlSource::Producer(producer)
    }
}

fn urls_from_value(value: Value) -> ConfigResult<Vec<String>> {
    match value {
        Value::String(url) => Ok(vec![url]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(url) => Ok(url),
                other => Err(ConfigError::unexpected_source(format!(
                    "array containing {}",
                    describe(&other)
                ))),
            })
            .collect(),
        other => Err(ConfigError::unexpected_source(describe(&other))),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}
