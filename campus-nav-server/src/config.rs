//! Server configuration, read from a TOML file and overridden from the
//! command line.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use campus_nav_core::NetworkConfig;
use clap::Parser;
use serde::Deserialize;

use crate::error::ServerError;

#[derive(Debug, Parser)]
#[command(name = "campus-nav-server", about = "Walking route service for the campus path network")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on, overrides the configuration file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// JSON file holding custom locations, overrides the configuration file
    #[arg(long)]
    pub locations: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Custom locations are kept in memory only when unset
    pub custom_locations_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
    pub network: NetworkConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            custom_locations_path: None,
            request_timeout_secs: 10,
            max_concurrent_requests: 64,
            network: NetworkConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ServerError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ServerError> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Configuration file (if any) with command line overrides applied
    pub fn load(cli: &Cli) -> Result<Self, ServerError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(bind) = cli.bind {
            config.bind = bind;
        }
        if let Some(locations) = &cli.locations {
            config.custom_locations_path = Some(locations.clone());
        }
        if config.max_concurrent_requests == 0 {
            return Err(ServerError::Config(
                "max_concurrent_requests must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}
