//! This module is responsible for loading the static path network, either
//! from CSV files or from the embedded campus data set.

mod builder;
mod config;
pub mod parser;
pub mod raw_types;

pub use builder::{campus_network, create_network};
pub use config::{NetworkConfig, RouterConfig};
