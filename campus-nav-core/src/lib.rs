//! Walking route engine over a fixed pedestrian path network.
//!
//! The static network is loaded once into a [`Network`] and shared between
//! requests. Each request may bring user-defined locations, which are joined
//! to the network for that request only before Dijkstra's algorithm runs.

pub mod algo;
mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{NetworkConfig, RouterConfig, campus_network, create_network};
pub use model::{Coordinate, Edge, Network, Node, PathGraph, RoutableLocation};
pub use routing::{
    Path, Route, compute_route, compute_route_between, compute_routes_one_to_many,
    list_routable_locations, shortest_path,
};
