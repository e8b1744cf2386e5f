use std::{fs, io};
use std::path::Path;

use serde::{Deserialize, Serialize};
use spdlog::{debug, info};

use crate::error::{BlogError, IoContext, Result};

/// One published post, as stored in the index file.
///
/// Fields missing from the file fall back to their defaults. `revision` is
/// never bumped by the publisher and is always written as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Log {
    pub publish_time: i64,
    pub title: String,
    pub revision: i32,
    pub topics: Vec<String>,
}

/// Append-only list of published posts. The position of a log is the name
/// of the directory holding its content, next to the index file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Index {
    pub logs: Vec<Log>,
}

impl Index {
    pub fn load(path: &Path) -> Result<Index> {
        let content = fs::read_to_string(path)
            .io_context(|| format!("Error reading index file {}", path.display()))?;

        let index = serde_json::from_str::<Index>(&content).map_err(|e| BlogError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        debug!("Loaded {} logs from {}", index.logs.len(), path.display());
        Ok(index)
    }

    /// Overwrites `path` with the whole index. Not atomic: a failed write can
    /// leave the previous content truncated.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)
            .map_err(io::Error::from)
            .io_context(|| format!("Error serializing index for {}", path.display()))?;

        fs::write(path, json)
            .io_context(|| format!("Error writing index file {}", path.display()))?;

        debug!("Saved {} logs to {}", self.logs.len(), path.display());
        Ok(())
    }

    /// Writes an empty index to `path`, replacing anything already there.
    pub fn create(path: &Path) -> Result<Index> {
        let index = Index::default();
        index.save(path)?;
        info!("Initial index has been created at {}", path.display());
        Ok(index)
    }

    /// Position the next published post will take.
    pub fn next_position(&self) -> usize {
        self.logs.len()
    }

    pub fn get(&self, position: usize) -> Option<&Log> {
        self.logs.get(position)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::test_data::INDEX_DATA;

    use super::*;

    #[test]
    fn test_load_index() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, INDEX_DATA).unwrap();

        let index = Index::load(&path).unwrap();
        assert_eq!(index.logs.len(), 2);
        assert_eq!(index.logs[0], Log {
            publish_time: 1704067200,
            title: "Hello world".to_string(),
            revision: 0,
            topics: vec!["rust".to_string(), "blog".to_string()],
        });
        assert_eq!(index.logs[1].title, "Second post");
        assert_eq!(index.next_position(), 2);
    }

    #[test]
    fn test_create_writes_empty_index() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");

        let index = Index::create(&path).unwrap();
        assert!(index.logs.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"logs":[]}"#);
        assert_eq!(Index::load(&path).unwrap(), index);
    }

    #[test]
    fn test_create_unwritable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("index.json");
        let err = Index::create(&path).unwrap_err();
        assert!(matches!(err, BlogError::Io { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = Index::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, BlogError::Io { .. }));
    }

    #[test]
    fn test_invalid_content_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");

        for content in ["# not json", "", "null", r#"{"logs": 12}"#] {
            fs::write(&path, content).unwrap();
            let err = Index::load(&path).unwrap_err();
            assert!(matches!(err, BlogError::Parse { .. }), "content: {}", content);
        }
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, r#"{"logs":[{"title":"Only a title"}]}"#).unwrap();

        let index = Index::load(&path).unwrap();
        assert_eq!(index.logs[0], Log {
            publish_time: 0,
            title: "Only a title".to_string(),
            revision: 0,
            topics: vec![],
        });
    }

    #[test]
    fn test_unknown_fields_are_dropped_on_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, r#"{"owner":"me","logs":[{"publishTime":5,"title":"t","revision":1,"topics":[],"draft":true}]}"#).unwrap();

        let index = Index::load(&path).unwrap();
        index.save(&path).unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        assert!(!saved.contains("owner"));
        assert!(!saved.contains("draft"));
        assert!(saved.contains(r#""publishTime":5"#));
        assert!(saved.contains(r#""revision":1"#));
    }

    #[test]
    fn test_save_load_is_stable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, INDEX_DATA).unwrap();

        Index::load(&path).unwrap().save(&path).unwrap();
        let first = Index::load(&path).unwrap();
        first.save(&path).unwrap();
        let second = Index::load(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, serde_json::from_str::<Index>(INDEX_DATA).unwrap());
    }
}
