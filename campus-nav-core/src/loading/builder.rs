use hashbrown::HashMap;
use log::info;

use super::config::{NetworkConfig, RouterConfig};
use super::parser::{deserialize_csv, deserialize_csv_file};
use super::raw_types::{RawEdge, RawNode};
use crate::{
    Error,
    algo::distance::distance_rounded,
    model::{Edge, Network, Node},
};

const CAMPUS_NODES: &str = include_str!("../../data/campus_nodes.csv");
const CAMPUS_EDGES: &str = include_str!("../../data/campus_edges.csv");

/// Creates the static network described by the configuration
///
/// # Errors
///
/// Returns an error if the files cannot be read or the data is inconsistent
pub fn create_network(config: &NetworkConfig) -> Result<Network, Error> {
    validate_config(config)?;

    let (raw_nodes, raw_edges) = match (&config.nodes_path, &config.edges_path) {
        (Some(nodes_path), Some(edges_path)) => {
            info!(
                "Loading path network from {} and {}",
                nodes_path.display(),
                edges_path.display()
            );
            (
                deserialize_csv_file::<RawNode>(nodes_path)?,
                deserialize_csv_file::<RawEdge>(edges_path)?,
            )
        }
        _ => {
            info!("Loading embedded campus network");
            (
                deserialize_csv::<RawNode, _>(CAMPUS_NODES.as_bytes())?,
                deserialize_csv::<RawEdge, _>(CAMPUS_EDGES.as_bytes())?,
            )
        }
    };

    let network = network_from_raw(raw_nodes, raw_edges, config.router.clone())?;
    info!(
        "Path network created: {} nodes, {} edges",
        network.nodes().len(),
        network.edges().len()
    );
    Ok(network)
}

/// The embedded campus network with default routing parameters
pub fn campus_network() -> Result<Network, Error> {
    create_network(&NetworkConfig::default())
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    match (&config.nodes_path, &config.edges_path) {
        (Some(_), None) | (None, Some(_)) => Err(Error::InvalidData(
            "nodes and edges files must be configured together".to_string(),
        )),
        _ => {
            if !config.router.distance_scale_factor.is_finite()
                || config.router.distance_scale_factor <= 0.0
            {
                return Err(Error::InvalidData(format!(
                    "distance scale factor must be positive, got {}",
                    config.router.distance_scale_factor
                )));
            }
            Ok(())
        }
    }
}

/// Turns raw records into a network, filling missing edge weights with the
/// rounded great-circle distance between the endpoints
pub(crate) fn network_from_raw(
    raw_nodes: Vec<RawNode>,
    raw_edges: Vec<RawEdge>,
    router: RouterConfig,
) -> Result<Network, Error> {
    let nodes: Vec<Node> = raw_nodes.into_iter().map(Node::from).collect();

    let edges = {
        let by_id: HashMap<&str, &Node> =
            nodes.iter().map(|node| (node.id.as_str(), node)).collect();
        let find = |id: &str| {
            by_id
                .get(id)
                .copied()
                .ok_or_else(|| Error::UnknownNode(id.to_string()))
        };

        raw_edges
            .into_iter()
            .map(|raw| {
                let weight = match raw.weight {
                    Some(weight) => weight,
                    None => distance_rounded(
                        find(&raw.from)?.coordinate(),
                        find(&raw.to)?.coordinate(),
                    ),
                };
                Ok(Edge::new(raw.from, raw.to, weight))
            })
            .collect::<Result<Vec<_>, Error>>()?
    };

    Network::new(nodes, edges, router)
}
