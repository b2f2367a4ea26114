//! Routable locations and custom location providers

use std::sync::RwLock;

use log::warn;

use serde::{Deserialize, Serialize};

use super::{Coordinate, Network, Node};
use crate::Error;

/// Named location offered for route selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutableLocation {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub is_custom: bool,
}

impl RoutableLocation {
    /// `None` for unnamed waypoints
    pub fn from_node(node: &Node) -> Option<Self> {
        node.name.as_ref().map(|name| Self {
            id: node.id.clone(),
            name: name.clone(),
            coordinate: node.coordinate(),
            is_custom: node.is_custom,
        })
    }
}

/// Source of user-defined locations.
///
/// Implementations decide how locations are persisted; the routing code only
/// reads them for the duration of a request.
pub trait CustomLocationStore: Send + Sync {
    fn list(&self) -> Result<Vec<Node>, Error>;

    /// Stores a location, marking it as custom. Returns the stored node.
    fn add(&self, node: Node) -> Result<Node, Error>;

    /// Returns `false` when no location had that id
    fn remove(&self, id: &str) -> Result<bool, Error>;
}

/// Checks a location before it enters a store
pub fn prepare_custom_node(existing: &[Node], mut node: Node) -> Result<Node, Error> {
    if node.id.trim().is_empty() {
        return Err(Error::InvalidLocation("id is empty".to_string()));
    }
    node.coordinate().validate()?;
    if existing.iter().any(|other| other.id == node.id) {
        return Err(Error::DuplicateNode(node.id));
    }
    node.is_custom = true;
    Ok(node)
}

/// Splits previously stored locations into the ones usable next to
/// `network` and the refused ones with their reason. A location is refused
/// when `prepare_custom_node` rejects it against the ones kept before it or
/// when its id belongs to a static node.
pub fn retain_valid_custom_nodes(
    network: &Network,
    nodes: Vec<Node>,
) -> (Vec<Node>, Vec<(String, Error)>) {
    let mut kept = Vec::with_capacity(nodes.len());
    let mut refused = Vec::new();

    for node in nodes {
        if network.contains(&node.id) {
            refused.push((node.id.clone(), Error::DuplicateNode(node.id)));
            continue;
        }
        let id = node.id.clone();
        match prepare_custom_node(&kept, node) {
            Ok(node) => kept.push(node),
            Err(e) => refused.push((id, e)),
        }
    }
    (kept, refused)
}

/// Store that keeps locations for the lifetime of the process
#[derive(Debug, Default)]
pub struct InMemoryLocationStore {
    nodes: RwLock<Vec<Node>>,
}

impl InMemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `nodes`, skipping the ones that cannot coexist with
    /// `network`
    pub fn with_nodes(network: &Network, nodes: Vec<Node>) -> Self {
        let (kept, refused) = retain_valid_custom_nodes(network, nodes);
        for (id, e) in refused {
            warn!("Skipping custom location {id}: {e}");
        }
        Self {
            nodes: RwLock::new(kept),
        }
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::InvalidData("custom location store lock poisoned".to_string())
}

impl CustomLocationStore for InMemoryLocationStore {
    fn list(&self) -> Result<Vec<Node>, Error> {
        Ok(self.nodes.read().map_err(poisoned)?.clone())
    }

    fn add(&self, node: Node) -> Result<Node, Error> {
        let mut nodes = self.nodes.write().map_err(poisoned)?;
        let node = prepare_custom_node(&nodes, node)?;
        nodes.push(node.clone());
        Ok(node)
    }

    fn remove(&self, id: &str) -> Result<bool, Error> {
        let mut nodes = self.nodes.write().map_err(poisoned)?;
        let before = nodes.len();
        nodes.retain(|node| node.id != id);
        Ok(nodes.len() != before)
    }
}
