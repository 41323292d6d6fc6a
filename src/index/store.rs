use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::error::{FbrefError, Result};
use crate::index::{IdMap, IdStore, NestedIdMap};

/// Index kept as a pretty-printed JSON object on disk.
///
/// The whole file is read on every call and rewritten on every update.
/// Writes are not atomic and there is no locking: concurrent updates of the
/// same file can lose entries, and a crash mid-write can leave it truncated.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store for the file at `path`. The file is created on the first merge.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the index file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, index: &NestedIdMap) -> Result<()> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        index
            .serialize(&mut serializer)
            .map_err(|e| FbrefError::Json {
                path: self.path.clone(),
                source: e,
            })?;
        std::fs::write(&self.path, buf).map_err(|e| FbrefError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl IdStore for JsonFileStore {
    fn load(&self) -> Result<NestedIdMap> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "index file missing, starting empty");
                return Ok(NestedIdMap::new());
            }
            Err(e) => {
                return Err(FbrefError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&contents).map_err(|e| FbrefError::Json {
            path: self.path.clone(),
            source: e,
        })
    }

    fn merge_put(&self, key: &str, entries: IdMap) -> Result<()> {
        let mut index = self.load()?;
        index.entry(key.to_string()).or_default().extend(entries);
        self.write(&index)?;
        debug!(path = %self.path.display(), key, "index file updated");
        Ok(())
    }
}

/// Index held in memory, for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    index: Mutex<NestedIdMap>,
}

impl MemoryStore {
    /// Store seeded with `index`.
    pub fn new(index: NestedIdMap) -> Self {
        Self {
            index: Mutex::new(index),
        }
    }
}

impl IdStore for MemoryStore {
    fn load(&self) -> Result<NestedIdMap> {
        Ok(self
            .index
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn merge_put(&self, key: &str, entries: IdMap) -> Result<()> {
        self.index
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_string())
            .or_default()
            .extend(entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> IdMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_file_created_on_first_merge() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams_ids.json");
        let store = JsonFileStore::new(&path);

        assert!(store.load().unwrap().is_empty());
        store
            .merge_put("LeagueA", entries(&[("TeamX", "abc123")]))
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({ "LeagueA": { "TeamX": "abc123" } })
        );
    }

    #[test]
    fn test_merge_keeps_other_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("players_ids.json"));

        store
            .merge_put("Ajax", entries(&[("Steven Bergwijn", "a1"), ("Davy Klaassen", "b2")]))
            .unwrap();
        store
            .merge_put("PSV", entries(&[("Luuk de Jong", "c3")]))
            .unwrap();
        store
            .merge_put("Ajax", entries(&[("Davy Klaassen", "b9"), ("Brian Brobbey", "d4")]))
            .unwrap();

        let index = store.load().unwrap();
        assert_eq!(
            index["Ajax"],
            entries(&[
                ("Steven Bergwijn", "a1"),
                ("Davy Klaassen", "b9"),
                ("Brian Brobbey", "d4"),
            ])
        );
        assert_eq!(index["PSV"]["Luuk de Jong"], "c3");
    }

    #[test]
    fn test_non_ascii_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players_ids.json");
        let store = JsonFileStore::new(&path);
        store
            .merge_put("Greuther Fürth", entries(&[("Mathias Kjølø", "e5")]))
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Mathias Kjølø"));
        assert!(raw.contains("\n    \"Greuther Fürth\""));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams_ids.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            JsonFileStore::new(&path).load(),
            Err(FbrefError::Json { .. })
        ));
    }

    #[test]
    fn test_memory_store_merge() {
        let store = MemoryStore::default();
        store.merge_put("LeagueA", entries(&[("TeamX", "1")])).unwrap();
        store.merge_put("LeagueA", entries(&[("TeamX", "2")])).unwrap();
        assert_eq!(store.load().unwrap()["LeagueA"]["TeamX"], "2");
    }
}
