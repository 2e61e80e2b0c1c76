//! Multi-instance chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relaychat-server
//! DATABASE_URL=postgres://... BUS_URL=postgres://... \
//!     cargo run --bin relaychat-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use relaychat_server::{
    config::{BUS_CHANNEL, Config},
    domain::MessageStore,
    infrastructure::{
        ConnectionRegistry,
        bus::{FanoutBus, PostgresBus},
        store::{EphemeralMessageStore, PostgresMessageStore},
    },
    ui::{Server, state::AppState},
    usecase::{BusRelay, GetHistoryUseCase, IngestMessageUseCase},
};
use relaychat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Multi-instance chat relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = Config::from_env();
    let instance_id = std::process::id();

    tracing::info!(
        "starting instance {} (store: {}, bus: {})",
        instance_id,
        config.store_mode(),
        config.bus_mode()
    );

    // Initialize dependencies in order:
    // 1. Message store
    // 2. Fan-out bus
    // 3. Connection registry + use cases
    // 4. Background relay
    // 5. Server

    // 1. Message store: persistent when DATABASE_URL is set, else ephemeral.
    let store: Arc<dyn MessageStore> = match &config.database_url {
        Some(url) => match PostgresMessageStore::connect(url).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!("failed to connect to message store: {}", e);
                std::process::exit(1);
            }
        },
        None => Arc::new(EphemeralMessageStore::new()),
    };

    // 2. Fan-out bus: networked when BUS_URL is set, else local-only.
    let bus = match &config.bus_url {
        Some(url) => match PostgresBus::connect(url).await {
            Ok(transport) => Arc::new(FanoutBus::networked(
                Arc::new(transport),
                BUS_CHANNEL,
                instance_id,
            )),
            Err(e) => {
                tracing::error!("failed to connect to bus: {}", e);
                std::process::exit(1);
            }
        },
        None => Arc::new(FanoutBus::local_only()),
    };

    // 3. Connection registry and use cases.
    let registry = Arc::new(ConnectionRegistry::new());
    let ingest_message_usecase = Arc::new(IngestMessageUseCase::new(
        store.clone(),
        bus.clone(),
        registry.clone(),
    ));
    let get_history_usecase = Arc::new(GetHistoryUseCase::new(store));

    // 4. Background relay for messages published by other instances.
    let relay = BusRelay::spawn(bus, registry.clone(), instance_id);

    // 5. Run the server.
    let state = Arc::new(AppState {
        ingest_message_usecase,
        get_history_usecase,
        registry,
        instance_id,
    });
    let server = Server::new(state);
    let result = server.run(args.host, args.port).await;

    relay.shutdown();

    if let Err(e) = result {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
