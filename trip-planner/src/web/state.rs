//! Application state for the web layer.

use std::sync::Arc;

use crate::network::Network;
use crate::planner::SearchConfig;
use crate::stations::StationIndex;

/// Shared application state.
///
/// The network is immutable once loaded, so handlers share it without
/// locking and each request runs its own search.
#[derive(Clone)]
pub struct AppState {
    /// Transit network
    pub network: Arc<Network>,

    /// Station name lookup over the same network
    pub stations: Arc<StationIndex>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state, indexing the network's station names.
    pub fn new(network: Network, config: SearchConfig) -> Self {
        let stations = StationIndex::from_network(&network);
        Self {
            network: Arc::new(network),
            stations: Arc::new(stations),
            config: Arc::new(config),
        }
    }
}
