//! Fetching configuration documents

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;

use crate::remote::error::{ConfigError, ConfigResult, FetchError};
use crate::remote::model::ConfigJson;

/// Retrieves one configuration document by URL
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ConfigJson, FetchError>;
}

/// HTTP client options for [`HttpFetcher`]
///
/// No timeout is applied unless one is set here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            user_agent: format!("runtime-config/{}", crate::pkg_version()),
        }
    }
}

/// Fetches configuration documents over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(options: &ClientOptions) -> ConfigResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(options.user_agent.as_str())
            .gzip(true)
            .brotli(true);

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = options.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let client = builder
            .build()
            .map_err(|source| ConfigError::Client { source })?;
        Ok(Self { client })
    }

    /// Use an already configured client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConfigFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<ConfigJson, FetchError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        tracing::trace!(url = %url, bytes = body.len(), "Configuration document received");
        parse_document(url, &body)
    }
}

/// Parse a response body into a configuration document
pub fn parse_document(url: &str, body: &[u8]) -> Result<ConfigJson, FetchError> {
    let value: Value = serde_json::from_slice(body).map_err(|source| FetchError::InvalidJson {
        url: url.to_string(),
        source,
    })?;

    match value {
        Value::Object(document) => Ok(document),
        _ => Err(FetchError::NotAnObject {
            url: url.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::test_support::spawn_config_server;
    use serde_json::json;

    fn fetcher() -> HttpFetcher {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to create HTTP client");
        HttpFetcher::with_client(client)
    }

    #[test]
    fn test_default_client_options() {
        let options = ClientOptions::default();
        assert!(options.timeout.is_none());
        assert!(options.user_agent.starts_with("runtime-config/"));
        assert!(HttpFetcher::new(&options).is_ok());
    }

    #[test]
    fn test_parse_document_rejects_non_object() {
        let err = parse_document("a.json", b"[1, 2]").unwrap_err();
        assert!(matches!(err, FetchError::NotAnObject { .. }));

        let err = parse_document("a.json", b"{oops").unwrap_err();
        assert!(matches!(err, FetchError::InvalidJson { .. }));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let base = spawn_config_server().await;

        let document = fetcher()
            .fetch(&format!("{base}config.common.json"))
            .await
            .unwrap();

        assert_eq!(
            Value::Object(document),
            json!({"backendUrl": "a", "cacheExpiration": "60"})
        );
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let base = spawn_config_server().await;
        let url = format!("{base}missing.json");

        let err = fetcher().fetch(&url).await.unwrap_err();
        match err {
            FetchError::Status { url: failed, status } => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_json() {
        let base = spawn_config_server().await;
        let err = fetcher()
            .fetch(&format!("{base}broken.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidJson { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind and drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetcher()
            .fetch(&format!("http://{addr}/config.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }
}
