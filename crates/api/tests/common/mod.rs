#![allow(dead_code)]

use std::sync::Arc;

use showroom_api::{build_app, AppConfig, AppState};
use showroom_core::MemoryStore;
use tokio::task::JoinHandle;

/// A running API server backed by an in-process store.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub fn test_config(max_body_bytes: Option<usize>) -> AppConfig {
    let max_body_bytes = max_body_bytes.map(|n| n.to_string());
    AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://unused/showroom".to_string()),
        "MAX_BODY_BYTES" => max_body_bytes.clone(),
        _ => None,
    })
    .expect("test config")
}

pub async fn spawn_server() -> TestServer {
    spawn_server_with(test_config(None)).await
}

pub async fn spawn_server_with(config: AppConfig) -> TestServer {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), config);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to port");
    let addr = listener.local_addr().expect("Failed to get local address");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{addr}"),
        store,
        client: reqwest::Client::new(),
        _handle: handle,
    }
}
