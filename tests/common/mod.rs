//! Shared harness: serves the full application on an ephemeral port.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use inventory_gateway::api;
use inventory_gateway::app_state::AppState;
use inventory_gateway::domain::EventBus;
use inventory_gateway::persistence::MemoryStore;
use inventory_gateway::service::InventoryService;

/// A running server backed by a fresh in-memory store.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Absolute HTTP URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// WebSocket URL of the `/ws` endpoint.
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

pub async fn spawn_app() -> TestServer {
    let service = InventoryService::new(
        Arc::new(MemoryStore::new()),
        EventBus::new(256),
        "current-user",
    );
    let app = api::build_app(AppState::new(service), Duration::from_secs(10));

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no local address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestServer {
        addr,
        client: reqwest::Client::new(),
    }
}

/// A complete, valid create body.
pub fn product_body(name: &str, category: &str, location: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": format!("{name} for stage use"),
        "category": category,
        "location": location,
    })
}
