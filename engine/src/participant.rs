//! Per-participant ledger record.

use serde::{Deserialize, Serialize};
use stakepool_types::Period;

/// Arena index of a participant record.
///
/// Ids are assigned in first-deposit order and never reused, so the id order
/// is the registry's insertion order.
pub type ParticipantId = u32;

/// Ledger record for a single participant.
///
/// Created lazily on first deposit and never deleted: after a full withdrawal
/// the record persists with `stake_amount = 0` and `is_active = false`, so
/// checkpoint history and registry membership survive and a later re-deposit
/// resumes cleanly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Current staked quantity, in raw units of the staked asset.
    pub stake_amount: u128,

    /// Last period at which rewards were accrued for this participant.
    /// `Period::ZERO` means "never initialized".
    pub checkpoint: Period,

    /// Accumulated unclaimed reward. Only accrual increases this; only a
    /// successful claim resets it.
    pub pending_reward: u128,

    /// Set once on first deposit, never cleared.
    pub has_ever_staked: bool,

    /// True while a deposit-established positive balance stands.
    pub is_active: bool,
}

impl Participant {
    /// A fresh, never-staked record.
    pub fn new() -> Self {
        Self {
            stake_amount: 0,
            checkpoint: Period::ZERO,
            pending_reward: 0,
            has_ever_staked: false,
            is_active: false,
        }
    }
}

impl Default for Participant {
    fn default() -> Self {
        Self::new()
    }
}
