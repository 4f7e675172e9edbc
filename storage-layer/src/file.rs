use crate::backend::StorageBackend;
use crate::error::StorageResult;
use crate::key::StorageKey;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File system storage backend.
///
/// Each key is one JSON file under the data directory. Writes go to a
/// temporary file first and are renamed into place, so an interrupted write
/// never corrupts the previous value of a key.
pub struct FileBackend {
    /// Base directory for storage
    base_path: PathBuf,
}

impl FileBackend {
    /// Open a file backend rooted at `base_path`, creating the directory if
    /// it does not exist.
    pub fn new(base_path: impl AsRef<Path>) -> StorageResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    fn key_path(&self, key: &StorageKey) -> PathBuf {
        self.base_path.join(format!("{}.json", key.name()))
    }
}

impl StorageBackend for FileBackend {
    fn read_raw(&self, key: &StorageKey) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_raw(&self, key: &StorageKey, value: &str) -> StorageResult<()> {
        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(key = %key, bytes = value.len(), "persisted collection");
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> StorageResult<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
