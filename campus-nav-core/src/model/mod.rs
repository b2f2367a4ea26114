//! Data model of the pedestrian path network
//!
//! Contains nodes, edges, the graph built over them and the providers of
//! user-defined locations.

pub mod components;
pub mod locations;
pub mod network;

pub use components::{Coordinate, Edge, Node};
pub use locations::{
    CustomLocationStore, InMemoryLocationStore, RoutableLocation, prepare_custom_node,
    retain_valid_custom_nodes,
};
pub use network::{IndexedPoint, Network, PathGraph};
