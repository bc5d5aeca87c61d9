//! Pool storage trait.

use crate::StoreError;
use stakepool_types::Address;

/// Store trait for persisting engine state to durable storage.
///
/// Uses opaque `Vec<u8>` values so the store doesn't depend on the
/// `stakepool-engine` crate (which would create a circular dependency).
/// The engine serializes/deserializes its own types.
pub trait PoolStore {
    fn get_participant(&self, address: &Address) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_participant(&self, address: &Address, record: &[u8]) -> Result<(), StoreError>;
    fn delete_participant(&self, address: &Address) -> Result<(), StoreError>;
    fn iter_participants(&self) -> Result<Vec<(Address, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
