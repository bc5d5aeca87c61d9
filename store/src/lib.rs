//! Abstract storage traits for the stakepool engine.
//!
//! Every storage backend (embedded key-value store, in-memory for testing)
//! implements these traits. The rest of the workspace depends only on the
//! traits, never on a concrete backend.

pub mod error;
pub mod pool;

pub use error::StoreError;
pub use pool::PoolStore;
