use anyhow::Result;
use std::collections::HashMap;

use super::KeyValueStore;

/// In-process slots for tests.
#[derive(Default)]
pub(crate) struct MemoryStore {
    slots: HashMap<String, String>,
    pub(crate) writes: usize,
}

impl MemoryStore {
    pub(crate) fn with_slot(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.slots.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
