//! Shared fixtures for remote configuration tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use serde_json::{Value, json};

use crate::remote::error::FetchError;
use crate::remote::fetch::ConfigFetcher;
use crate::remote::model::ConfigJson;

/// Serve a fixed set of configuration documents on an ephemeral port
///
/// Returns the base URL, ending with `/`. Unknown paths answer 404.
pub async fn spawn_config_server() -> String {
    let app = Router::new()
        .route("/config.json", get(|| async { axum::Json(json!({"source": "default"})) }))
        .route(
            "/config.common.json",
            get(|| async { axum::Json(json!({"backendUrl": "a", "cacheExpiration": "60"})) }),
        )
        .route(
            "/config.LOCAL.json",
            get(|| async { axum::Json(json!({"backendUrl": "b"})) }),
        )
        .route(
            "/app/config.json",
            get(|| async { axum::Json(json!({"source": "app"})) }),
        )
        .route("/broken.json", get(|| async { "not json" }))
        .route("/list.json", get(|| async { axum::Json(json!([1, 2])) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    format!("http://{addr}/")
}

pub fn object(value: Value) -> ConfigJson {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected JSON object, got {other}"),
    }
}

/// Canned answer for one URL of a [`MemoryFetcher`]
#[derive(Debug, Clone)]
pub enum MemoryResponse {
    Document(ConfigJson),
    Delayed(Duration, ConfigJson),
    Status(u16),
    /// Never completes
    Hang,
}

/// In-memory fetcher recording the URLs it was asked for
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, MemoryResponse>,
    requested: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, response: MemoryResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub fn with_document(self, url: &str, document: Value) -> Self {
        self.with(url, MemoryResponse::Document(object(document)))
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<ConfigJson, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());

        match self.responses.get(url).cloned() {
            Some(MemoryResponse::Document(document)) => Ok(document),
            Some(MemoryResponse::Delayed(delay, document)) => {
                tokio::time::sleep(delay).await;
                Ok(document)
            }
            Some(MemoryResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            Some(MemoryResponse::Hang) => futures::future::pending().await,
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
