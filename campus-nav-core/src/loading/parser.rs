use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::Error;

/// Deserializes every record of a CSV source, failing on the first bad row
pub fn deserialize_csv<T, R>(reader: R) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
    R: Read,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(Error::from)
}

pub fn deserialize_csv_file<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    deserialize_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::raw_types::{RawEdge, RawNode};

    #[test]
    fn optional_columns() {
        let nodes: Vec<RawNode> =
            deserialize_csv("id,lat,lng,name\nA, 1.5 ,2.5,Hall\nB,3,4,\n".as_bytes()).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name.as_deref(), Some("Hall"));
        assert_eq!(nodes[0].lat, 1.5);
        assert_eq!(nodes[1].name, None);

        let edges: Vec<RawEdge> = deserialize_csv("from,to,weight\nA,B,\nB,C,12\n".as_bytes()).unwrap();
        assert_eq!(edges[0].weight, None);
        assert_eq!(edges[1].weight, Some(12.0));
    }

    #[test]
    fn malformed_row_fails() {
        let result: Result<Vec<RawNode>, _> = deserialize_csv("id,lat,lng,name\nA,north,2,\n".as_bytes());
        assert!(matches!(result, Err(Error::CsvError(_))));
    }

    #[test]
    fn missing_file() {
        let result: Result<Vec<RawNode>, _> = deserialize_csv_file(Path::new("/nonexistent/nodes.csv"));
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
