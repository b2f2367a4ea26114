use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No nodes available for snapping")]
    EmptyNodeSet,
    #[error("Unknown node: {0}")]
    UnknownNode(String),
    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),
    #[error("Invalid weight {weight} on edge {from} - {to}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },
    #[error("No edge available to attach a custom node to")]
    NoReachableEdge,
    #[error("No path exists from {from} to {to}")]
    NoPathExists { from: String, to: String },
    #[error("Invalid coordinate: lat {lat}, lng {lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },
    #[error("Shortest path search exceeded {0} iterations")]
    IterationLimitExceeded(usize),
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
