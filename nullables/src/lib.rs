//! Nullable infrastructure for deterministic testing.
//!
//! All of the engine's external dependencies (period clock, persistence,
//! asset custody, reward mint) are abstracted behind traits or call
//! arguments. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically (including programmed failures)
//! - Never touch a real clock, the filesystem, or any network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod asset;
pub mod clock;
pub mod store;

pub use asset::NullAsset;
pub use clock::NullClock;
pub use store::NullStore;
