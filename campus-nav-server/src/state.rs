use std::sync::Arc;

use campus_nav_core::prelude::{CustomLocationStore, InMemoryLocationStore};
use campus_nav_core::{Network, create_network};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::store::JsonFileLocationStore;

/// Shared between handlers. The network never changes after startup.
#[derive(Clone)]
pub struct AppState {
    pub network: Arc<Network>,
    pub store: Arc<dyn CustomLocationStore>,
}

impl AppState {
    pub fn new(network: Arc<Network>, store: Arc<dyn CustomLocationStore>) -> Self {
        Self { network, store }
    }

    /// Loads the network and opens the configured location store
    pub fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
        let network = create_network(&config.network)?.into_shared();
        let store: Arc<dyn CustomLocationStore> = match &config.custom_locations_path {
            Some(path) => Arc::new(JsonFileLocationStore::open(path, &network)?),
            None => {
                tracing::info!("custom locations are kept in memory");
                Arc::new(InMemoryLocationStore::new())
            }
        };
        Ok(Self::new(network, store))
    }
}
