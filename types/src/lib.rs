//! Fundamental types for the stakepool engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: participant addresses, the period counter, and pool parameters.

pub mod address;
pub mod params;
pub mod period;

pub use address::Address;
pub use params::{PoolParams, SCALE};
pub use period::Period;
