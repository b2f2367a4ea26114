//! Graph representation of the path network

use std::sync::Arc;

use hashbrown::HashMap;
use itertools::Itertools;
use log::{debug, trace};
use petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};
use rstar::{RTree, primitives::GeomWithData};

use super::{Coordinate, Edge, Node};
use crate::{Error, RouterConfig, algo::distance::planar_distance};

/// Point of the spatial index, carrying the position of the node in the
/// static node list
pub type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Undirected weighted graph over a node/edge collection.
///
/// Node indices follow the order of the input node slice, which is what the
/// shortest path search uses to break ties.
#[derive(Debug, Clone)]
pub struct PathGraph {
    pub(crate) graph: UnGraph<Node, f64>,
    index: HashMap<String, NodeIndex>,
}

impl PathGraph {
    /// Builds the adjacency structure from nodes and undirected edges.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateNode`] if two nodes share an id
    /// - [`Error::UnknownNode`] if an edge references a missing node
    /// - [`Error::InvalidWeight`] if an edge weight is negative or not finite
    pub fn build(nodes: &[Node], edges: &[Edge]) -> Result<Self, Error> {
        let mut graph = UnGraph::with_capacity(nodes.len(), edges.len());
        let mut index = HashMap::with_capacity(nodes.len());

        for node in nodes {
            if index.contains_key(node.id.as_str()) {
                return Err(Error::DuplicateNode(node.id.clone()));
            }
            let idx = graph.add_node(node.clone());
            index.insert(node.id.clone(), idx);
        }

        for edge in edges {
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(Error::InvalidWeight {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    weight: edge.weight,
                });
            }
            let from = lookup(&index, &edge.from)?;
            let to = lookup(&index, &edge.to)?;
            graph.add_edge(from, to, edge.weight);
        }

        trace!(
            "Built path graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self { graph, index })
    }

    /// Neighbors of a node with the weight of the connecting edge, in edge
    /// insertion order
    pub fn neighbors(&self, node_id: &str) -> Result<Vec<(&str, f64)>, Error> {
        let idx = self.node_index(node_id)?;
        let neighbors = self
            .graph
            .edges(idx)
            .sorted_by_key(|edge| edge.id())
            .map(|edge| {
                let other = if edge.source() == idx {
                    edge.target()
                } else {
                    edge.source()
                };
                (self.graph[other].id.as_str(), *edge.weight())
            })
            .collect();
        Ok(neighbors)
    }

    pub fn node_index(&self, node_id: &str) -> Result<NodeIndex, Error> {
        lookup(&self.index, node_id)
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.index.get(node_id).map(|&idx| &self.graph[idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn lookup(index: &HashMap<String, NodeIndex>, node_id: &str) -> Result<NodeIndex, Error> {
    index
        .get(node_id)
        .copied()
        .ok_or_else(|| Error::UnknownNode(node_id.to_string()))
}

/// Static path network shared by all route requests.
///
/// Immutable after construction; requests layer custom nodes and edges on
/// top of it without touching the static collections.
#[derive(Debug)]
pub struct Network {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    rtree: RTree<IndexedPoint>,
    pub config: RouterConfig,
}

impl Network {
    /// Validates the static data by building its graph once, then indexes
    /// node positions.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, config: RouterConfig) -> Result<Self, Error> {
        for node in &nodes {
            node.coordinate().validate()?;
        }
        let graph = PathGraph::build(&nodes, &edges)?;
        debug!(
            "Static network: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        let points = nodes
            .iter()
            .enumerate()
            .map(|(order, node)| IndexedPoint::new([node.lng, node.lat], order))
            .collect();

        Ok(Self {
            nodes,
            edges,
            rtree: RTree::bulk_load(points),
            config,
        })
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == node_id)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.node(node_id).is_some()
    }

    /// Static nodes followed by the given custom nodes
    pub fn nodes_with_custom(&self, custom_nodes: &[Node]) -> Vec<Node> {
        self.nodes
            .iter()
            .chain(custom_nodes.iter())
            .cloned()
            .collect()
    }

    /// Nearest node over the static nodes followed by `custom_nodes`.
    ///
    /// Equivalent to [`crate::algo::nearest::resolve`] over the concatenated
    /// list: static candidates come from the spatial index, custom ones are
    /// scanned, and the first minimum in iteration order wins.
    pub fn nearest_node<'a>(
        &'a self,
        coordinate: Coordinate,
        custom_nodes: &'a [Node],
    ) -> Result<&'a Node, Error> {
        // The R-tree ranks by squared distance; candidates are re-measured
        // with the resolver's `hypot` so ties break the same way.
        let query = [coordinate.lng, coordinate.lat];
        let mut best = self
            .rtree
            .nearest_neighbors(&query)
            .into_iter()
            .map(|point| {
                let node = &self.nodes[point.data];
                (point.data, node, planar_distance(coordinate, node.coordinate()))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2).then(a.0.cmp(&b.0)))
            .map(|(_, node, dist)| (node, dist));

        for node in custom_nodes {
            let dist = planar_distance(coordinate, node.coordinate());
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((node, dist));
            }
        }

        best.map(|(node, _)| node).ok_or(Error::EmptyNodeSet)
    }
}
