//! Route requests over the static network and per-request custom locations

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    Error,
    algo::attachment::connect_custom_nodes,
    model::{Coordinate, Network, Node, PathGraph, RoutableLocation},
    routing::dijkstra::{Path, shortest_path},
};

/// Walking route between two resolved nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Id of the node the route starts from
    pub start: String,
    /// Id of the node the route ends at
    pub end: String,
    pub path: Path,
}

impl Route {
    /// Ordered coordinates for display
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.path.coordinates()
    }

    /// Total walking distance in meters
    pub fn distance(&self) -> f64 {
        self.path.total_weight
    }
}

/// Graph of one request: static network plus connected custom locations.
///
/// The static collections are copied, never modified.
pub struct RequestGraph<'a> {
    network: &'a Network,
    nodes: Vec<Node>,
    graph: PathGraph,
}

impl<'a> RequestGraph<'a> {
    pub fn build(network: &'a Network, custom_nodes: &[Node]) -> Result<Self, Error> {
        for node in custom_nodes {
            node.coordinate().validate()?;
        }

        let nodes = network.nodes_with_custom(custom_nodes);
        let edges = connect_custom_nodes(
            custom_nodes,
            &nodes,
            network.edges(),
            network.config.distance_scale_factor,
        );
        debug!(
            "Request graph: {} custom locations, {} connector edges",
            custom_nodes.len(),
            edges.len() - network.edges().len()
        );

        let graph = PathGraph::build(&nodes, &edges)?;
        Ok(Self {
            network,
            nodes,
            graph,
        })
    }

    pub fn graph(&self) -> &PathGraph {
        &self.graph
    }

    /// Nearest node of the request graph, static nodes first
    pub fn resolve(&self, coordinate: Coordinate) -> Result<&Node, Error> {
        let custom_nodes = &self.nodes[self.network.nodes().len()..];
        self.network.nearest_node(coordinate, custom_nodes)
    }

    pub fn route(&self, start_id: &str, end_id: &str) -> Result<Route, Error> {
        let path = shortest_path(
            &self.graph,
            start_id,
            end_id,
            self.network.config.max_iterations,
        )?;
        Ok(Route {
            start: start_id.to_string(),
            end: end_id.to_string(),
            path,
        })
    }
}

/// Route between the nodes nearest to two coordinates.
///
/// Custom locations are attached to the network for this request only.
///
/// # Errors
///
/// Any error of snapping, attachment or the shortest path search, e.g.
/// [`Error::NoPathExists`] when the endpoints are not connected.
pub fn compute_route(
    network: &Network,
    start: Coordinate,
    end: Coordinate,
    custom_nodes: &[Node],
) -> Result<Route, Error> {
    let request = RequestGraph::build(network, custom_nodes)?;
    let start_node = request.resolve(start)?;
    let end_node = request.resolve(end)?;

    info!("Finding path from {} to {}", start_node.id, end_node.id);
    let route = request.route(&start_node.id, &end_node.id)?;
    info!(
        "Path found: {} nodes, {} m",
        route.path.nodes.len(),
        route.distance()
    );
    Ok(route)
}

/// Route between two node ids, custom ids included
pub fn compute_route_between(
    network: &Network,
    start_id: &str,
    end_id: &str,
    custom_nodes: &[Node],
) -> Result<Route, Error> {
    RequestGraph::build(network, custom_nodes)?.route(start_id, end_id)
}

/// Routes from one coordinate to many, computed in parallel over a shared
/// request graph. Each target gets its own result.
pub fn compute_routes_one_to_many(
    network: &Network,
    start: Coordinate,
    ends: &[Coordinate],
    custom_nodes: &[Node],
) -> Result<Vec<Result<Route, Error>>, Error> {
    let request = RequestGraph::build(network, custom_nodes)?;
    let start_id = request.resolve(start)?.id.clone();

    let routes = ends
        .par_iter()
        .map(|&end| {
            let end_node = request.resolve(end)?;
            request.route(&start_id, &end_node.id)
        })
        .collect();

    Ok(routes)
}

/// Named locations of the static network followed by named custom ones.
/// Unnamed waypoints are left out.
pub fn list_routable_locations(network: &Network, custom_nodes: &[Node]) -> Vec<RoutableLocation> {
    network
        .nodes()
        .iter()
        .chain(custom_nodes.iter())
        .filter_map(RoutableLocation::from_node)
        .collect()
}
