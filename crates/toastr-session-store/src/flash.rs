//! In-memory two-slot flash session.
//!
//! Flash data lives in one of two slots:
//! - **incoming**: values flashed during the current request. Readable
//!   immediately so the writer sees its own data.
//! - **readable**: values flashed during the previous request. Readable for
//!   the whole current request, discarded at the next boundary.
//!
//! [`FlashSession::advance`] marks a request boundary: the readable slot is
//! dropped and the incoming slot takes its place.

use crate::{SessionResult, SessionStore};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Slots {
    incoming: HashMap<String, Value>,
    readable: HashMap<String, Value>,
}

/// Session store holding flash data in memory for a single user session.
#[derive(Debug, Default)]
pub struct FlashSession {
    slots: Mutex<Slots>,
}

impl FlashSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// End the current request.
    ///
    /// Values flashed by the previous request expire; values flashed by the
    /// current request become readable for the next one.
    pub fn advance(&self) {
        let mut slots = self.slots.lock();
        let incoming = std::mem::take(&mut slots.incoming);
        let expired = std::mem::replace(&mut slots.readable, incoming);
        tracing::trace!(
            expired = expired.len(),
            carried = slots.readable.len(),
            "flash session advanced"
        );
    }

    /// Keep every readable value alive for one more request.
    ///
    /// Values already flashed during this request take precedence.
    pub fn reflash(&self) {
        let mut slots = self.slots.lock();
        let readable = std::mem::take(&mut slots.readable);
        for (key, value) in readable {
            slots.incoming.entry(key).or_insert(value);
        }
    }

    /// Number of keys visible to `get` right now.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock();
        slots
            .readable
            .keys()
            .filter(|key| !slots.incoming.contains_key(*key))
            .count()
            + slots.incoming.len()
    }

    /// Check if no flash data is visible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for FlashSession {
    fn flash(&self, key: &str, value: Value) -> SessionResult<()> {
        let mut slots = self.slots.lock();
        slots.readable.remove(key);
        slots.incoming.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> SessionResult<Option<Value>> {
        let slots = self.slots.lock();
        Ok(slots
            .incoming
            .get(key)
            .or_else(|| slots.readable.get(key))
            .cloned())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        let mut slots = self.slots.lock();
        slots.incoming.remove(key);
        slots.readable.remove(key);
        Ok(())
    }
}
