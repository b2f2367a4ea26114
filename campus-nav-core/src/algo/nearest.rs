use crate::{
    Error,
    algo::distance::planar_distance,
    model::{Coordinate, Node},
};

/// Nearest node by planar distance, scanning `nodes` in order.
///
/// The first node at the minimum distance wins.
pub fn resolve(coordinate: Coordinate, nodes: &[Node]) -> Result<&Node, Error> {
    let mut best: Option<(&Node, f64)> = None;

    for node in nodes {
        let dist = planar_distance(coordinate, node.coordinate());
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((node, dist));
        }
    }

    best.map(|(node, _)| node).ok_or(Error::EmptyNodeSet)
}
