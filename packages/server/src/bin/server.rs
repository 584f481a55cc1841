//! Real-time messaging and presence server for SponsorLink.
//!
//! Serves the chat, contract, deal and notification namespaces over WebSocket
//! plus a small HTTP API.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sponsorlink-server
//! cargo run --bin sponsorlink-server -- --host 0.0.0.0 --port 3000 --log-level info
//! ```

use std::sync::Arc;

use clap::Parser;
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
use sponsorlink_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "sponsorlink-server")]
#[command(about = "Real-time messaging and presence server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(short = 'l', long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies per namespace, in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. NamespaceChannel (UseCases + router)
    // 4. Server
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let channels = NamespaceKind::ALL
        .into_iter()
        .map(|kind| {
            // 1. Create Repository (in-memory, one per namespace)
            let repository = Arc::new(InMemoryPresenceRepository::default());

            // 2. Create MessagePusher (WebSocket implementation)
            let message_pusher = Arc::new(WebSocketMessagePusher::default());

            // 3. Create the namespace channel
            tracing::debug!("Namespace '{}' ready", kind);
            Arc::new(NamespaceChannel::new(
                router_for(kind),
                repository,
                message_pusher,
                clock.clone(),
            ))
        })
        .collect();

    // 4. Create and run the server
    let server = Server::new(channels);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
