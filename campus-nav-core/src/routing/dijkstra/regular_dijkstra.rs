use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::visit::EdgeRef;

use super::state::State;
use crate::{Error, model::PathGraph};

/// Dijkstra's algorithm from a single source over the whole graph.
/// Returns a map of reachable node ids to distances in meters, optionally
/// cut at `max_cost`.
pub fn shortest_path_weights<'g>(
    graph: &'g PathGraph,
    start_id: &str,
    max_cost: Option<f64>,
) -> Result<HashMap<&'g str, f64>, Error> {
    let start = graph.node_index(start_id)?;
    let mut distances = HashMap::new();
    let mut heap = BinaryHeap::new();

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in graph.graph.edges(node) {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            let next_cost = cost + edge.weight();
            if max_cost.is_some_and(|max| next_cost > max) {
                continue;
            }

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    Ok(distances
        .into_iter()
        .map(|(idx, cost)| (graph.graph[idx].id.as_str(), cost))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node};

    fn graph() -> PathGraph {
        let nodes = vec![
            Node::waypoint("A", 0.0, 0.0),
            Node::waypoint("B", 0.0, 1.0),
            Node::waypoint("C", 0.0, 2.0),
            Node::waypoint("ISLAND", 5.0, 5.0),
        ];
        let edges = vec![
            Edge::new("A", "B", 10.0),
            Edge::new("B", "C", 10.0),
            Edge::new("A", "C", 25.0),
        ];
        PathGraph::build(&nodes, &edges).unwrap()
    }

    #[test]
    fn weights_from_source() {
        let graph = graph();
        let weights = shortest_path_weights(&graph, "A", None).unwrap();
        assert_eq!(weights.len(), 3);
        assert_eq!(weights["A"], 0.0);
        assert_eq!(weights["B"], 10.0);
        assert_eq!(weights["C"], 20.0);
        assert!(!weights.contains_key("ISLAND"));
    }

    #[test]
    fn weights_with_cutoff() {
        let graph = graph();
        let weights = shortest_path_weights(&graph, "A", Some(15.0)).unwrap();
        assert_eq!(weights.len(), 2);
        assert!(!weights.contains_key("C"));
    }

    #[test]
    fn unknown_source() {
        assert!(matches!(
            shortest_path_weights(&graph(), "Z", None),
            Err(Error::UnknownNode(_))
        ));
    }
}
