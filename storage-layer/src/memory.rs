use crate::backend::StorageBackend;
use crate::error::StorageResult;
use crate::key::StorageKey;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory storage backend for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys. Test helper.
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn read_raw(&self, key: &StorageKey) -> StorageResult<Option<String>> {
        Ok(self.values.lock().get(&key.name()).cloned())
    }

    fn write_raw(&self, key: &StorageKey, value: &str) -> StorageResult<()> {
        self.values.lock().insert(key.name(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> StorageResult<()> {
        self.values.lock().remove(&key.name());
        Ok(())
    }
}
