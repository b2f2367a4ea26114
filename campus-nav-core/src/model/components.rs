//! Path network components - coordinates, nodes and edges

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Geographic coordinate in decimal degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Rejects non-finite or out of range latitude/longitude.
    pub fn validate(self) -> Result<Self, Error> {
        let in_range = self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng);

        if in_range {
            Ok(self)
        } else {
            Err(Error::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }

    /// Planar representation, `x` is longitude and `y` is latitude
    pub fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }

    pub fn to_point(self) -> Point<f64> {
        Point::from(self.to_coord())
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lng: coord.x,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    /// `(lat, lng)` pair
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Point of interest on the path network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    /// Named nodes are significant locations, unnamed ones are waypoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "custom")]
    pub is_custom: bool,
}

impl Node {
    /// Unnamed waypoint of the static network
    pub fn waypoint(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            name: None,
            is_custom: false,
        }
    }

    /// Named location of the static network
    pub fn location(id: impl Into<String>, lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::waypoint(id, lat, lng)
        }
    }

    /// User-defined location
    pub fn custom(id: impl Into<String>, lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            is_custom: true,
            ..Self::location(id, lat, lng, name)
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn geometry(&self) -> Point<f64> {
        self.coordinate().to_point()
    }

    pub fn is_significant(&self) -> bool {
        self.name.is_some()
    }
}

/// Undirected connection between two nodes, weight is in meters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// Checks whether the edge joins the same unordered pair of nodes
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}
