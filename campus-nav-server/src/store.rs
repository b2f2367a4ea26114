//! Custom locations persisted as a JSON array on disk

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use campus_nav_core::Error;
use campus_nav_core::prelude::{CustomLocationStore, prepare_custom_node, retain_valid_custom_nodes};
use campus_nav_core::{Network, Node};

/// Keeps the locations in memory and rewrites the whole file on every
/// change. The file is replaced through a temporary sibling so a crash
/// never leaves it half written.
#[derive(Debug)]
pub struct JsonFileLocationStore {
    path: PathBuf,
    nodes: Mutex<Vec<Node>>,
}

impl JsonFileLocationStore {
    /// Reads existing locations; a missing file is an empty store.
    ///
    /// Entries that clash with `network` or with an earlier entry, or that
    /// fail validation, are skipped with a warning and dropped from the file
    /// on the next write.
    pub fn open(path: impl Into<PathBuf>, network: &Network) -> Result<Self, Error> {
        let path = path.into();
        let stored = match fs::read_to_string(&path) {
            Ok(text) => parse_nodes(&text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let (nodes, refused) = retain_valid_custom_nodes(network, stored);
        for (id, e) in &refused {
            tracing::warn!(path = %path.display(), %id, error = %e, "skipping stored custom location");
        }
        tracing::info!(
            path = %path.display(),
            count = nodes.len(),
            "loaded custom locations"
        );
        Ok(Self {
            path,
            nodes: Mutex::new(nodes),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, nodes: &[Node]) -> Result<(), Error> {
        let json =
            serde_json::to_string_pretty(nodes).map_err(|e| Error::InvalidData(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn parse_nodes(text: &str) -> Result<Vec<Node>, Error> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text)
        .map_err(|e| Error::InvalidData(format!("custom locations file: {e}")))
}

fn poisoned<T>(_: T) -> Error {
    Error::InvalidData("custom location store lock poisoned".to_string())
}

impl CustomLocationStore for JsonFileLocationStore {
    fn list(&self) -> Result<Vec<Node>, Error> {
        Ok(self.nodes.lock().map_err(poisoned)?.clone())
    }

    fn add(&self, node: Node) -> Result<Node, Error> {
        let mut nodes = self.nodes.lock().map_err(poisoned)?;
        let node = prepare_custom_node(&nodes, node)?;
        nodes.push(node.clone());
        if let Err(e) = self.persist(&nodes) {
            nodes.pop();
            return Err(e);
        }
        Ok(node)
    }

    fn remove(&self, id: &str) -> Result<bool, Error> {
        let mut nodes = self.nodes.lock().map_err(poisoned)?;
        let Some(position) = nodes.iter().position(|node| node.id == id) else {
            return Ok(false);
        };
        let removed = nodes.remove(position);
        if let Err(e) = self.persist(&nodes) {
            nodes.insert(position, removed);
            return Err(e);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use campus_nav_core::campus_network;

    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            JsonFileLocationStore::open(dir.path().join("locations.json"), &campus_network().unwrap())
                .unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn changes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.json");

        let store = JsonFileLocationStore::open(&path, &campus_network().unwrap()).unwrap();
        store.add(Node::location("CAFE", 43.4733, -80.5447, "Cafe")).unwrap();
        store.add(Node::location("LIB", 43.4750, -80.5420, "Library")).unwrap();
        assert!(store.remove("LIB").unwrap());

        let reopened = JsonFileLocationStore::open(&path, &campus_network().unwrap()).unwrap();
        let nodes = reopened.list().unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "CAFE");
        assert!(nodes[0].is_custom);
    }

    #[test]
    fn reads_legacy_custom_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.json");
        fs::write(
            &path,
            r#"[{"id": "X", "lat": 43.47, "lng": -80.54, "name": "X", "custom": true}]"#,
        )
        .unwrap();

        let store = JsonFileLocationStore::open(&path, &campus_network().unwrap()).unwrap();
        assert!(store.list().unwrap()[0].is_custom);
    }

    #[test]
    fn invalid_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.json");
        fs::write(
            &path,
            r#"[
                {"id": "GYM", "lat": 43.47, "lng": -80.54, "name": "Shadow gym", "custom": true},
                {"id": "CAFE", "lat": 43.4733, "lng": -80.5447, "name": "Cafe", "custom": true},
                {"id": "CAFE", "lat": 43.4734, "lng": -80.5448, "name": "Cafe again", "custom": true},
                {"id": "MOON", "lat": 143.0, "lng": -80.54, "name": "Moon", "custom": true},
                {"id": " ", "lat": 43.47, "lng": -80.54, "name": "Blank", "custom": true}
            ]"#,
        )
        .unwrap();

        let store = JsonFileLocationStore::open(&path, &campus_network().unwrap()).unwrap();
        let ids: Vec<String> = store.list().unwrap().into_iter().map(|node| node.id).collect();
        assert_eq!(ids, vec!["CAFE"]);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFileLocationStore::open(&path, &campus_network().unwrap()),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileLocationStore::open(
            dir.path().join("gone").join("locations.json"),
            &campus_network().unwrap(),
        )
        .unwrap();
        assert!(store.add(Node::location("CAFE", 43.0, -80.0, "Cafe")).is_err());
        assert!(store.list().unwrap().is_empty());
    }
}
