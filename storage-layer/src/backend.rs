use crate::error::{StorageError, StorageResult};
use crate::key::StorageKey;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Synchronous key-value storage of serialized collections.
///
/// Backends store opaque strings; typed access goes through [`StorageExt`],
/// which handles JSON serialization and the absent/malformed-value defaults.
pub trait StorageBackend {
    /// Read the raw serialized value for `key`, if present.
    fn read_raw(&self, key: &StorageKey) -> StorageResult<Option<String>>;

    /// Write the raw serialized value for `key`, replacing any prior value.
    fn write_raw(&self, key: &StorageKey, value: &str) -> StorageResult<()>;

    /// Remove the value for `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &StorageKey) -> StorageResult<()>;
}

/// Typed load/store helpers over any [`StorageBackend`].
pub trait StorageExt: StorageBackend {
    /// Load and deserialize the collection stored under `key`.
    ///
    /// An absent key yields `T::default()`. A value that no longer
    /// deserializes also yields the default, with a warning, so one corrupted
    /// key never takes down the application.
    fn load<T>(&self, key: &StorageKey) -> StorageResult<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.read_raw(key)? {
            None => Ok(T::default()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(value),
                Err(err) => {
                    warn!(key = %key, error = %err, "malformed persisted value, using default");
                    Ok(T::default())
                }
            },
        }
    }

    /// Serialize and store `value` under `key`.
    fn store<T>(&self, key: &StorageKey, value: &T) -> StorageResult<()>
    where
        T: Serialize,
    {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.name(),
            source,
        })?;
        self.write_raw(key, &raw)
    }
}

impl<B: StorageBackend + ?Sized> StorageExt for B {}
