//! Attachment of off-network points to the path network.
//!
//! A custom location is joined to the network with a single new edge towards
//! an endpoint of the closest segment, instead of splitting that segment.
//! Distances are planar in degrees and converted to meters with a constant
//! scale factor, which is an approximation valid for small areas only.

use geo::Coord;
use hashbrown::HashMap;
use log::{trace, warn};

use crate::{
    Error,
    algo::distance::{planar_distance, planar_to_meters},
    model::{Coordinate, Edge, Node},
};

/// Result of attaching a custom node to the network
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// Closest point on the chosen segment
    pub connection_point: Coordinate,
    /// Endpoint of the chosen segment the new edge leads to
    pub connected_to: String,
    /// Planar distance to the connection point, in degrees
    pub distance: f64,
    pub edge: Edge,
}

/// Closest point of segment `start`-`end` to `point`, with its planar distance.
///
/// Degenerate segments collapse to `start`.
pub fn closest_point_on_segment(
    point: Coord<f64>,
    start: Coord<f64>,
    end: Coord<f64>,
) -> (Coord<f64>, f64) {
    let to_point = point - start;
    let segment = end - start;
    let len_sq = segment.x * segment.x + segment.y * segment.y;

    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((to_point.x * segment.x + to_point.y * segment.y) / len_sq).clamp(0.0, 1.0)
    };

    let closest = start + segment * t;
    let offset = point - closest;
    (closest, offset.x.hypot(offset.y))
}

/// Finds the closest edge to `custom_node` and synthesizes the edge joining
/// it to the nearer endpoint of that edge.
///
/// Edges with an endpoint missing from `all_nodes` and edges already touching
/// the custom node are ignored.
///
/// # Errors
///
/// [`Error::NoReachableEdge`] when no edge can be used.
pub fn attach(
    custom_node: &Node,
    all_nodes: &[Node],
    edges: &[Edge],
    scale_factor: f64,
) -> Result<Attachment, Error> {
    let mut by_id: HashMap<&str, &Node> = HashMap::with_capacity(all_nodes.len());
    for node in all_nodes {
        by_id.entry(node.id.as_str()).or_insert(node);
    }

    let custom_point = custom_node.coordinate();
    let mut best: Option<(Coord<f64>, &Node, &Node, f64)> = None;

    for edge in edges {
        if edge.from == custom_node.id || edge.to == custom_node.id {
            continue;
        }
        let (Some(&from), Some(&to)) = (by_id.get(edge.from.as_str()), by_id.get(edge.to.as_str()))
        else {
            continue;
        };

        let (closest, dist) = closest_point_on_segment(
            custom_point.to_coord(),
            from.coordinate().to_coord(),
            to.coordinate().to_coord(),
        );
        if best.is_none_or(|(_, _, _, best_dist)| dist < best_dist) {
            best = Some((closest, from, to, dist));
        }
    }

    let (closest, from, to, distance) = best.ok_or(Error::NoReachableEdge)?;

    let target = if planar_distance(custom_point, from.coordinate())
        < planar_distance(custom_point, to.coordinate())
    {
        from
    } else {
        to
    };

    trace!(
        "Attaching {} to {} via segment {} - {}",
        custom_node.id, target.id, from.id, to.id
    );

    Ok(Attachment {
        connection_point: closest.into(),
        connected_to: target.id.clone(),
        distance,
        edge: Edge::new(
            custom_node.id.clone(),
            target.id.clone(),
            planar_to_meters(distance, scale_factor),
        ),
    })
}

/// Returns `edges` extended with one connector edge per custom node.
///
/// Every custom node is attached against the given `edges`, so custom
/// nodes never chain onto each other. A connector is skipped when an edge
/// between the same pair of nodes already exists. Nodes without the custom
/// flag are left alone.
pub fn connect_custom_nodes(
    custom_nodes: &[Node],
    all_nodes: &[Node],
    edges: &[Edge],
    scale_factor: f64,
) -> Vec<Edge> {
    let mut connected = edges.to_vec();

    for custom_node in custom_nodes.iter().filter(|node| node.is_custom) {
        match attach(custom_node, all_nodes, edges, scale_factor) {
            Ok(attachment) => {
                let new_edge = attachment.edge;
                if !connected
                    .iter()
                    .any(|edge| edge.connects(&new_edge.from, &new_edge.to))
                {
                    connected.push(new_edge);
                }
            }
            Err(err) => warn!("Custom location {} left unconnected: {err}", custom_node.id),
        }
    }

    connected
}
