//! Shortest path search and route requests

pub mod dijkstra;
pub mod route;
mod to_geojson;

pub use dijkstra::{Path, shortest_path, shortest_path_weights};
pub use route::{
    RequestGraph, Route, compute_route, compute_route_between, compute_routes_one_to_many,
    list_routable_locations,
};
