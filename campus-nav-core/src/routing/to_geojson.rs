use geo::{Coord, LineString};
use geojson::{Feature, Geometry, GeometryValue};
use serde_json::json;

use super::Route;
use crate::Error;

impl Route {
    /// Converts the route to a `GeoJSON` `Feature`.
    ///
    /// The geometry is a `LineString` in longitude/latitude order, or a
    /// `Point` when start and end are the same node.
    pub fn to_geojson(&self) -> Result<Feature, Error> {
        let coords: Vec<Coord<f64>> = self
            .coordinates()
            .into_iter()
            .map(|coordinate| coordinate.to_coord())
            .collect();

        let geometry = match coords.as_slice() {
            [single] => Geometry::new(GeometryValue::from(&geo::Point::from(*single))),
            _ => Geometry::new(GeometryValue::from(&LineString::new(coords))),
        };

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "start": self.start,
                "end": self.end,
                "distance_m": self.distance(),
                "nodes": self.path.node_ids(),
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::{
        model::Node,
        routing::{Path, Route},
    };

    fn route(nodes: Vec<Node>, total_weight: f64) -> Route {
        Route {
            start: nodes[0].id.clone(),
            end: nodes[nodes.len() - 1].id.clone(),
            path: Path {
                nodes,
                total_weight,
            },
        }
    }

    #[test]
    fn line_string_in_lng_lat_order() {
        let route = route(
            vec![
                Node::waypoint("A", 43.0, -80.0),
                Node::waypoint("B", 43.5, -80.5),
            ],
            42.0,
        );
        let json: Value = serde_json::from_str(&route.to_geojson_string().unwrap()).unwrap();

        assert_eq!(json["geometry"]["type"], "LineString");
        assert_eq!(json["geometry"]["coordinates"][0][0], -80.0);
        assert_eq!(json["geometry"]["coordinates"][0][1], 43.0);
        assert_eq!(json["properties"]["distance_m"], 42.0);
        assert_eq!(json["properties"]["nodes"][1], "B");
    }

    #[test]
    fn single_node_route_is_a_point() {
        let route = route(vec![Node::waypoint("A", 43.0, -80.0)], 0.0);
        let json: Value = serde_json::from_str(&route.to_geojson_string().unwrap()).unwrap();
        assert_eq!(json["geometry"]["type"], "Point");
    }
}
