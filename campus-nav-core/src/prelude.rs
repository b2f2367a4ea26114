// Re-export key components
pub use crate::algo::{attach, connect_custom_nodes, distance, resolve};
pub use crate::loading::{NetworkConfig, RouterConfig, campus_network, create_network};
pub use crate::model::{
    Coordinate, CustomLocationStore, Edge, InMemoryLocationStore, Network, Node, PathGraph,
    RoutableLocation, prepare_custom_node, retain_valid_custom_nodes,
};
pub use crate::routing::{
    Path, Route, compute_route, compute_route_between, compute_routes_one_to_many,
    list_routable_locations, shortest_path, shortest_path_weights,
};

pub use crate::Error;
