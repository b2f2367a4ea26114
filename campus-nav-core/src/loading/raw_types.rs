use serde::Deserialize;

use crate::model::Node;

#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        Node {
            id: raw.id,
            lat: raw.lat,
            lng: raw.lng,
            name: raw.name.filter(|name| !name.trim().is_empty()),
            is_custom: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    pub from: String,
    pub to: String,
    /// Computed from node coordinates when empty
    #[serde(default)]
    pub weight: Option<f64>,
}
