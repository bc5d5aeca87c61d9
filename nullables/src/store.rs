//! Nullable store — thread-safe in-memory storage for testing.

use stakepool_store::{PoolStore, StoreError};
use stakepool_types::Address;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory pool store for testing.
pub struct NullStore {
    participants: Mutex<HashMap<String, Vec<u8>>>,
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            participants: Mutex::new(HashMap::new()),
            meta: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolStore for NullStore {
    fn get_participant(&self, address: &Address) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .participants
            .lock()
            .unwrap()
            .get(address.as_str())
            .cloned())
    }

    fn put_participant(&self, address: &Address, record: &[u8]) -> Result<(), StoreError> {
        self.participants
            .lock()
            .unwrap()
            .insert(address.as_str().to_string(), record.to_vec());
        Ok(())
    }

    fn delete_participant(&self, address: &Address) -> Result<(), StoreError> {
        self.participants
            .lock()
            .unwrap()
            .remove(address.as_str())
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(address.to_string()))
    }

    fn iter_participants(&self) -> Result<Vec<(Address, Vec<u8>)>, StoreError> {
        Ok(self
            .participants
            .lock()
            .unwrap()
            .iter()
            .map(|(key, value)| (Address::new(key.clone()), value.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta.lock().unwrap().insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
