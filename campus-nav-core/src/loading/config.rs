use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::algo::distance::DEFAULT_DISTANCE_SCALE_FACTOR;

/// Parameters of route computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Meters per planar degree for connector edges of custom locations
    pub distance_scale_factor: f64,
    /// Upper bound on nodes settled by one shortest path search
    pub max_iterations: Option<usize>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            distance_scale_factor: DEFAULT_DISTANCE_SCALE_FACTOR,
            max_iterations: None,
        }
    }
}

/// Where to load the static network from.
///
/// Without paths the embedded campus network is used. Both CSV paths must be
/// given together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// CSV with `id,lat,lng,name` columns
    pub nodes_path: Option<PathBuf>,
    /// CSV with `from,to,weight` columns, empty weights are computed
    pub edges_path: Option<PathBuf>,
    pub router: RouterConfig,
}
