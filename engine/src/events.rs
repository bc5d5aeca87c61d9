//! Events emitted by the pool for observers.
//!
//! Events are notifications, not a request/response API: they carry what
//! happened, and only fire after the operation has committed. A rolled-back
//! operation emits nothing.

use stakepool_types::Address;

/// Pool-level events observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolEvent {
    /// A participant deposited stake.
    Deposit { participant: Address, amount: u128 },
    /// A participant withdrew their full stake.
    Withdraw { participant: Address, amount: u128 },
    /// A participant claimed pending rewards; `amount` was minted to them.
    RewardsClaimed { participant: Address, amount: u128 },
    /// An owner batch sweep accrued the whole active set. Carries no
    /// per-participant detail.
    RewardsDistributed,
}

/// Synchronous fan-out event bus for pool events.
///
/// Listeners are invoked inline on the emitting thread; keep handlers fast to
/// avoid stalling the operation that emitted.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&PoolEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&PoolEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &PoolEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
