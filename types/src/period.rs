//! Period counter type used throughout the engine.
//!
//! A period is a discrete, monotonically non-decreasing unit of time supplied
//! by the environment (for example a block height). The engine never reads a
//! clock itself; every operation takes the current period as an argument.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete period number.
///
/// Period 0 doubles as the "never initialized" checkpoint sentinel, so
/// environments should start their counters at 1 or later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period(u64);

impl Period {
    /// Period zero — the uninitialized-checkpoint sentinel.
    pub const ZERO: Self = Self(0);

    pub fn new(n: u64) -> Self {
        Self(n)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether this is the uninitialized sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Periods elapsed since `earlier` (zero if `earlier` is later).
    pub fn elapsed_since(&self, earlier: Period) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
