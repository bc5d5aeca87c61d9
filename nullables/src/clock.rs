//! Nullable period clock — deterministic time for testing.

use stakepool_types::Period;
use std::cell::Cell;

/// A deterministic period counter for testing.
///
/// The engine consumes periods from its environment; in tests, this is the
/// environment. Periods only advance when you tell them to.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_period: u64) -> Self {
        Self {
            current: Cell::new(initial_period),
        }
    }

    /// Get the current period.
    pub fn now(&self) -> Period {
        Period::new(self.current.get())
    }

    /// Advance by a number of periods.
    pub fn advance(&self, periods: u64) {
        self.current.set(self.current.get() + periods);
    }

    /// Set the counter to a specific period.
    pub fn set(&self, period: u64) {
        self.current.set(period);
    }
}
