use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{VersionInput, VersionRecord};
use crate::store::{StoreError, StoreResult, VersionStore, VersionTable};

/// Version store kept as a JSON document on disk
///
/// Each call loads the document, applies one operation and writes it back.
/// A missing file is an empty tracker.
#[derive(Debug, Clone)]
pub struct FileVersionStore {
    path: PathBuf,
}

impl FileVersionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileVersionStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document
    pub fn load(&self) -> StoreResult<VersionTable> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(VersionTable::new()),
            Err(e) => {
                return Err(StoreError::unavailable(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            StoreError::unavailable(format!("cannot decode {}: {}", self.path.display(), e))
        })
    }

    /// Replace the whole document
    pub fn save(&self, table: &VersionTable) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(table).map_err(|e| {
            StoreError::unavailable(format!("cannot encode version table: {}", e))
        })?;

        // Readers must never see a half-written document
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                StoreError::unavailable(format!("cannot write {}: {}", self.path.display(), e))
            })
    }

    fn modify<T>(&self, apply: impl FnOnce(&mut VersionTable) -> StoreResult<T>) -> StoreResult<T> {
        let mut table = self.load()?;
        let result = apply(&mut table)?;
        self.save(&table)?;
        Ok(result)
    }
}

impl VersionStore for FileVersionStore {
    fn list_versions(&self, project_key: &str) -> StoreResult<Vec<VersionRecord>> {
        Ok(self.load()?.versions(project_key))
    }

    fn update_version(&self, self_ref: &str, input: &VersionInput) -> StoreResult<()> {
        self.modify(|table| table.update(self_ref, input))
    }

    fn create_version(&self, input: &VersionInput) -> StoreResult<VersionRecord> {
        self.modify(|table| table.create(input))
    }

    fn reorder_after(&self, moved_ref: &str, after_ref: &str) -> StoreResult<()> {
        self.modify(|table| table.reorder_after(moved_ref, after_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileVersionStore::new(dir.path().join("versions.json"));
        assert!(store.list_versions("ABC").unwrap().is_empty());
    }

    #[test]
    fn test_create_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("versions.json");
        let store = FileVersionStore::new(&path);

        store
            .create_version(&VersionInput::unreleased("ABC", "1.0.0"))
            .unwrap();

        let reopened = FileVersionStore::new(&path);
        let versions = reopened.list_versions("ABC").unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].name, "1.0.0");
    }

    #[test]
    fn test_corrupt_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("versions.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileVersionStore::new(&path).list_versions("ABC").unwrap_err();
        assert!(matches!(err, StoreError::RemoteUnavailable(_)));
    }

    #[test]
    fn test_failed_operation_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("versions.json");
        let store = FileVersionStore::new(&path);
        store
            .create_version(&VersionInput::unreleased("ABC", "1.0.0"))
            .unwrap();
        let before = fs::read_to_string(&path).unwrap();

        assert!(store
            .create_version(&VersionInput::unreleased("ABC", "1.0.0"))
            .is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
