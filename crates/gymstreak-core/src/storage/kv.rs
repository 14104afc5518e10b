//! String-keyed store holding JSON values.
//!
//! Every collection the tracker persists lives under one key of a
//! [`KeyValueStore`]. The store is passed in explicitly so tests can swap the
//! SQLite database for [`MemoryStore`].

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{CoreError, Result};

/// Storage keys used by the tracker.
pub mod keys {
    pub const ATTENDANCE: &str = "attendance_records";
    pub const LOCATIONS: &str = "gym_locations";
    pub const STREAK_PROTECTORS: &str = "streak_protectors";
    pub const USER_DATA: &str = "user_data";
    pub const POINTS: &str = "user_points";

    pub const ALL: [&str; 5] = [ATTENDANCE, LOCATIONS, STREAK_PROTECTORS, USER_DATA, POINTS];
}

/// Minimal get/set/delete capability over string keys and values.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Decode the JSON stored under `key`, or `T::default()` when absent.
    fn get_json<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
        Self: Sized,
    {
        match self.get(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                warn!(key, error = %e, "stored value is not valid JSON for its type");
                CoreError::Json(e)
            }),
            None => Ok(T::default()),
        }
    }

    /// Encode `value` as JSON under `key`.
    fn set_json<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self, key: &str) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| CoreError::Store {
            key: key.to_string(),
            message: "memory store lock poisoned".to_string(),
        })
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock(key)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock(key)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock(key)?.remove(key);
        Ok(())
    }
}
