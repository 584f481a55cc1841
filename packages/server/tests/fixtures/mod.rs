//! Test fixtures: an in-process server on an ephemeral port and a WebSocket client.

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use sponsorlink_server::{
    domain::NamespaceKind,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRepository,
    },
    ui::{
        Server,
        namespace::{NamespaceChannel, router_for},
    },
};
use sponsorlink_shared::time::{Clock, FixedClock};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// Fixed server time used by every test server (2023-01-01T00:00:00.123Z)
pub const NOW_MILLIS: i64 = 1672531200123;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Helper struct to manage the server task lifecycle
pub struct TestServer {
    port: u16,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server on an ephemeral port
    pub async fn start() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(NOW_MILLIS));
        let channels = NamespaceKind::ALL
            .into_iter()
            .map(|kind| {
                Arc::new(NamespaceChannel::new(
                    router_for(kind),
                    Arc::new(InMemoryPresenceRepository::default()),
                    Arc::new(WebSocketMessagePusher::default()),
                    clock.clone(),
                ))
            })
            .collect();
        let app = Server::new(channels).router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let port = listener.local_addr().expect("No local address").port();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        TestServer { port, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self, namespace: &str) -> String {
        format!("ws://127.0.0.1:{}/ws/{}", self.port, namespace)
    }

    /// Connect to a namespace without identifying
    pub async fn connect(&self, namespace: &str) -> TestClient {
        let (stream, _) = connect_async(self.ws_url(namespace))
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    /// Connect and complete `init_user`
    pub async fn connect_as(&self, namespace: &str, user_id: &str, username: &str) -> TestClient {
        let mut client = self.connect(namespace).await;
        client
            .send("init_user", json!({"id": user_id, "username": username}))
            .await;
        client.recv_event("init_success").await;
        client
    }

    /// Connect, identify and join a room
    pub async fn join(
        &self,
        namespace: &str,
        user_id: &str,
        join_event: &str,
        room: Value,
    ) -> TestClient {
        let mut client = self.connect_as(namespace, user_id, &user_id.to_lowercase()).await;
        client.send(join_event, room).await;
        client.recv_event("room_joined").await;
        client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// WebSocket client speaking the `{"event", "data"}` envelope
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn send(&mut self, event: &str, data: Value) {
        let frame = json!({"event": event, "data": data}).to_string();
        self.stream
            .send(Message::text(frame))
            .await
            .expect("Failed to send");
    }

    /// Next envelope, or `None` when nothing arrives within `wait`
    pub async fn try_recv(&mut self, wait: Duration) -> Option<Value> {
        loop {
            let msg = tokio::time::timeout(wait, self.stream.next()).await.ok()??;
            match msg.expect("WebSocket error") {
                Message::Text(text) => {
                    return Some(serde_json::from_str(text.as_str()).expect("Invalid JSON"));
                }
                Message::Close(_) => return None,
                _ => continue,
            }
        }
    }

    /// Skip envelopes until one named `event` arrives and return its data
    pub async fn recv_event(&mut self, event: &str) -> Value {
        loop {
            let envelope = self
                .try_recv(RECV_TIMEOUT)
                .await
                .unwrap_or_else(|| panic!("Timed out waiting for '{event}'"));
            if envelope["event"] == event {
                return envelope["data"].clone();
            }
        }
    }

    /// Assert that no envelope named `event` arrives within `wait`
    pub async fn assert_no_event(&mut self, event: &str, wait: Duration) {
        while let Some(envelope) = self.try_recv(wait).await {
            assert_ne!(envelope["event"], event, "Unexpected '{event}': {envelope}");
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
