//! Integration test support
//!
//! Boots the full server (in-memory store, real broadcast hub, stub event
//! sources) on a loopback port and drives it over real HTTP/WebSocket.

pub mod fixtures;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use bubble_api::{create_app, create_app_state_with_sources};
use bubble_common::AppConfig;
use bubble_core::EventSource;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

/// Configuration suitable for tests: in-memory store, temp upload dir
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.path = ":memory:".to_string();
    config.storage.upload_dir = std::env::temp_dir()
        .join(format!("bubblemap-it-{}", Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    config
}

impl TestServer {
    /// Start a server with the default stub sources
    pub async fn start() -> Result<Self> {
        Self::start_with_sources(vec![Arc::new(fixtures::StubSource::two_events())]).await
    }

    /// Start a server with custom event sources
    pub async fn start_with_sources(sources: Vec<Arc<dyn EventSource>>) -> Result<Self> {
        let state = create_app_state_with_sources(test_config(), sources).await?;
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        let server = Self {
            addr,
            client: Client::new(),
            _handle: handle,
        };
        server.wait_until_ready().await?;
        Ok(server)
    }

    async fn wait_until_ready(&self) -> Result<()> {
        for _ in 0..50 {
            if let Ok(response) = self.client.get(self.url("/health")).send().await {
                if response.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        anyhow::bail!("server did not become ready")
    }

    /// Full URL for a path
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// WebSocket URL for a path
    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{path}", self.addr)
    }

    /// GET as the identity bound to `token`
    pub async fn get(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header("x-client-fingerprint", token)
            .send()
            .await?)
    }

    /// POST a JSON body as the identity bound to `token`
    pub async fn post_json(
        &self,
        path: &str,
        token: &str,
        body: &impl Serialize,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header("x-client-fingerprint", token)
            .json(body)
            .send()
            .await?)
    }

    /// POST with an empty body as the identity bound to `token`
    pub async fn post_empty(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header("x-client-fingerprint", token)
            .send()
            .await?)
    }

    /// Create a bubble through the multipart endpoint; returns the bubble body
    pub async fn create_bubble(
        &self,
        token: &str,
        lat: f64,
        lng: f64,
        title: &str,
    ) -> Result<serde_json::Value> {
        let form = reqwest::multipart::Form::new()
            .text("lat", lat.to_string())
            .text("lng", lng.to_string())
            .text("title", title.to_string());
        let response = self
            .client
            .post(self.url("/api/bubbles"))
            .header("x-client-fingerprint", token)
            .multipart(form)
            .send()
            .await?;
        assert_json(response, StatusCode::OK).await
    }
}

/// Assert a status and decode the JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    anyhow::ensure!(
        status == expected,
        "expected {expected}, got {status}: {body}"
    );
    Ok(serde_json::from_str(&body)?)
}

/// Assert a status and return the machine-readable error code
pub async fn assert_error(
    response: Response,
    expected: StatusCode,
) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected).await?;
    Ok(body["error"]["code"]
        .as_str()
        .unwrap_or_default()
        .to_string())
}
