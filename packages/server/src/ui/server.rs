//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        get_room_detail, get_rooms, health_check, list_namespaces, send_notification,
        websocket_handler,
    },
    namespace::NamespaceChannel,
    signal::shutdown_signal,
    state::AppState,
};

/// Real-time presence server
///
/// Serves one WebSocket endpoint per namespace plus the HTTP API.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(vec![chat, contract, deal, notification]);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// 名前空間チャンネル（chat / contract / deal / notification）
    channels: Vec<Arc<NamespaceChannel>>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `channels` - One channel per namespace
    pub fn new(channels: Vec<Arc<NamespaceChannel>>) -> Self {
        Self { channels }
    }

    /// Build the router without binding a socket
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState::new(self.channels.iter().cloned()));

        Router::new()
            // WebSocket エンドポイント
            .route("/ws/{namespace}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/namespaces", get(list_namespaces))
            .route("/api/namespaces/{namespace}/rooms", get(get_rooms))
            .route(
                "/api/namespaces/{namespace}/rooms/{room_id}",
                get(get_room_detail),
            )
            .route("/api/notifications", post(send_notification))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Presence server listening on {}", listener.local_addr()?);
        for channel in &self.channels {
            tracing::info!("Namespace: ws://{}/ws/{}", bind_addr, channel.kind());
        }
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
