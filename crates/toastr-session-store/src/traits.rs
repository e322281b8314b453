//! Session store trait definitions.

use crate::SessionResult;
use serde_json::Value;

/// Trait for host session backends.
///
/// Implementations provide read-your-writes consistency within one session.
/// Values written with [`SessionStore::flash`] survive exactly one request
/// boundary after the one that wrote them.
pub trait SessionStore: Send + Sync {
    /// Store a value that stays readable for the rest of this request and
    /// the next one
    fn flash(&self, key: &str, value: Value) -> SessionResult<()>;

    /// Retrieve a value
    fn get(&self, key: &str) -> SessionResult<Option<Value>>;

    /// Delete a value
    fn remove(&self, key: &str) -> SessionResult<()>;

    /// Check if a key exists
    fn has(&self, key: &str) -> SessionResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl dyn SessionStore {
    /// Retrieve a value and deserialize it.
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, key: &str) -> SessionResult<Option<T>> {
        match self.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}
