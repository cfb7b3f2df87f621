use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use trip_planner::network::load_network;
use trip_planner::planner::SearchConfig;
use trip_planner::web::{AppState, create_router};

/// Network file used when `TRIP_NETWORK` is not set.
const DEFAULT_NETWORK: &str = "network.json";

/// Listen address used when `TRIP_ADDR` is not set.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let network_path =
        std::env::var("TRIP_NETWORK").unwrap_or_else(|_| DEFAULT_NETWORK.to_string());
    let addr: SocketAddr = std::env::var("TRIP_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .expect("TRIP_ADDR must be a socket address");

    // Create search config
    let search_config = SearchConfig::default();

    // Load the network once; it is read-only from here on
    let network = load_network(&network_path, search_config.transfer_penalty)
        .expect("Failed to load network");

    // Build app state
    let state = AppState::new(network, search_config);
    info!(
        stations = state.network.len(),
        connections = state.network.connection_count(),
        "network ready"
    );

    // Create router
    let app = create_router(state);

    // Bind and serve
    info!("Trip planner listening on http://{addr}");
    info!("API Endpoints:");
    info!("  GET  /health               - Health check");
    info!("  GET  /api/network          - Network summary");
    info!("  GET  /api/stations/search  - Search stations by name");
    info!("  POST /api/route            - Plan a route");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
