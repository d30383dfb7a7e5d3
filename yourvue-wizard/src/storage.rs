//! Persistence port and typed record helpers.
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::StorageError;

/// Key/value persistence used by the store and every stage draft.
///
/// Implementations hold string payloads; typed access goes through
/// [`load_record`] and [`save_record`].
pub trait WizardStorage {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` from the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn clear(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage handle shared by the store and the mounted stage controller.
pub type SharedStorage = Rc<dyn WizardStorage>;

impl fmt::Debug for dyn WizardStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn WizardStorage")
    }
}

/// A JSON document persisted under a fixed key.
pub trait PersistedRecord: Serialize + DeserializeOwned {
    const KEY: &'static str;

    /// Value used when nothing usable is stored.
    fn fallback() -> Self;

    /// Hook to repair values decoded from storage.
    fn normalized(self) -> Self {
        self
    }
}

/// Load a record, falling back when it is missing, unreadable or malformed.
#[must_use]
pub fn load_record<T: PersistedRecord>(storage: &dyn WizardStorage) -> T {
    match try_load_record::<T>(storage) {
        Ok(Some(record)) => record.normalized(),
        Ok(None) => T::fallback(),
        Err(err) => {
            log::warn!("discarding stored `{}`: {err}", T::KEY);
            T::fallback()
        }
    }
}

/// Load a record and surface failures instead of falling back.
///
/// # Errors
///
/// Returns an error if the backend read fails or the payload is malformed.
pub fn try_load_record<T: PersistedRecord>(
    storage: &dyn WizardStorage,
) -> Result<Option<T>, StorageError> {
    storage
        .get(T::KEY)?
        .map(|raw| serde_json::from_str(&raw).map_err(StorageError::from))
        .transpose()
}

/// Persist a record; failures are logged and otherwise ignored.
pub fn save_record<T: PersistedRecord>(storage: &dyn WizardStorage, record: &T) {
    let result = serde_json::to_string(record)
        .map_err(StorageError::from)
        .and_then(|json| storage.set(T::KEY, &json));
    if let Err(err) = result {
        log::warn!("failed to persist `{}`: {err}", T::KEY);
    }
}

/// In-memory storage for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    offline: Cell<bool>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Simulate an unavailable backend: every call fails while offline.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn ensure_online(&self) -> Result<(), StorageError> {
        if self.offline.get() {
            Err(StorageError::Unavailable("memory storage offline".into()))
        } else {
            Ok(())
        }
    }
}

impl WizardStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_online()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_online()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.ensure_online()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        hits: u32,
    }

    impl PersistedRecord for Counter {
        const KEY: &'static str = "test-counter";

        fn fallback() -> Self {
            Self { hits: 7 }
        }

        fn normalized(self) -> Self {
            Self {
                hits: self.hits.min(100),
            }
        }
    }

    #[test]
    fn missing_record_uses_fallback() {
        let storage = MemoryStorage::new();
        assert_eq!(load_record::<Counter>(&storage), Counter { hits: 7 });
    }

    #[test]
    fn saved_record_round_trips_and_normalizes() {
        let storage = MemoryStorage::new();
        save_record(&storage, &Counter { hits: 3 });
        assert_eq!(storage.raw("test-counter").as_deref(), Some(r#"{"hits":3}"#));
        assert_eq!(load_record::<Counter>(&storage), Counter { hits: 3 });

        storage.set("test-counter", r#"{"hits":900}"#).unwrap();
        assert_eq!(load_record::<Counter>(&storage), Counter { hits: 100 });
    }

    #[test]
    fn malformed_or_unavailable_storage_falls_back() {
        let storage = MemoryStorage::new();
        storage.set("test-counter", "{{{").unwrap();
        assert!(try_load_record::<Counter>(&storage).is_err());
        assert_eq!(load_record::<Counter>(&storage), Counter { hits: 7 });

        storage.set_offline(true);
        assert_eq!(load_record::<Counter>(&storage), Counter { hits: 7 });
        save_record(&storage, &Counter { hits: 1 });
        storage.set_offline(false);
        assert_eq!(storage.raw("test-counter").as_deref(), Some("{{{"));
    }

    #[test]
    fn clear_removes_entries() {
        let storage = MemoryStorage::new();
        storage.set("a", "1").unwrap();
        storage.clear("a").unwrap();
        assert!(storage.get("a").unwrap().is_none());
        assert!(storage.keys().is_empty());
    }
}
