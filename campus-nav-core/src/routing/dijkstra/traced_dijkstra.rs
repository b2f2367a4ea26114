use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use itertools::Itertools;
use log::{debug, trace};
use petgraph::{graph::NodeIndex, visit::EdgeRef};
use serde::Serialize;

use super::state::State;
use crate::{
    Error,
    model::{Coordinate, Node, PathGraph},
};

/// Minimum weight sequence of nodes between two nodes of a graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub nodes: Vec<Node>,
    /// Sum of edge weights along the path, in meters
    pub total_weight: f64,
}

impl Path {
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.nodes.iter().map(Node::coordinate).collect()
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.id.as_str()).collect()
    }

    /// Number of edges traversed
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Checks that every consecutive pair of nodes is joined by an edge of
    /// `graph` and that the edge weights add up to `total_weight`
    pub fn is_consistent_with(&self, graph: &PathGraph) -> bool {
        let mut total = 0.0;
        for (a, b) in self.nodes.iter().tuple_windows() {
            let Ok(neighbors) = graph.neighbors(&a.id) else {
                return false;
            };
            let Some(weight) = neighbors
                .iter()
                .filter(|(id, _)| *id == b.id)
                .map(|&(_, weight)| weight)
                .min_by(f64::total_cmp)
            else {
                return false;
            };
            total += weight;
        }
        (total - self.total_weight).abs() < 1e-9
    }
}

/// Dijkstra's algorithm between two nodes of the graph.
///
/// The search stops as soon as the destination is settled. `max_iterations`
/// bounds the number of settled nodes.
///
/// # Errors
///
/// - [`Error::UnknownNode`] if either id is not in the graph
/// - [`Error::NoPathExists`] if the nodes are in different components
/// - [`Error::IterationLimitExceeded`] if the bound is hit first
pub fn shortest_path(
    graph: &PathGraph,
    start_id: &str,
    end_id: &str,
    max_iterations: Option<usize>,
) -> Result<Path, Error> {
    let start = graph.node_index(start_id)?;
    let target = graph.node_index(end_id)?;

    let node_count = graph.graph.node_count();
    let mut distances = vec![f64::INFINITY; node_count];
    let mut predecessors: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut visited = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::with_capacity(node_count / 4 + 1);
    let mut iterations = 0usize;

    distances[start.index()] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Stale entry, node already settled with a lower cost
        if visited.contains(node.index()) {
            continue;
        }
        visited.insert(node.index());

        if node == target {
            break;
        }

        iterations += 1;
        if let Some(limit) = max_iterations {
            if iterations > limit {
                return Err(Error::IterationLimitExceeded(limit));
            }
        }

        for edge in graph.graph.edges(node) {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            if visited.contains(next.index()) {
                continue;
            }

            let next_cost = cost + edge.weight();
            if next_cost < distances[next.index()] {
                distances[next.index()] = next_cost;
                predecessors[next.index()] = Some(node);
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    let total_weight = distances[target.index()];
    if total_weight.is_infinite() {
        debug!("No path from {start_id} to {end_id}");
        return Err(Error::NoPathExists {
            from: start_id.to_string(),
            to: end_id.to_string(),
        });
    }

    // Follow predecessors backward from target to start
    let mut node_path = vec![target];
    let mut current = target;
    while let Some(prev) = predecessors[current.index()] {
        node_path.push(prev);
        current = prev;
    }
    node_path.reverse();

    let nodes: Vec<Node> = node_path
        .into_iter()
        .map(|idx| graph.graph[idx].clone())
        .collect();

    trace!(
        "Path {start_id} -> {end_id}: {} nodes, {total_weight} m",
        nodes.len()
    );

    Ok(Path {
        nodes,
        total_weight,
    })
}
