//! Pool ledger state — participant arena, registry, active-set index.
//!
//! Participants live in an arena addressed by [`ParticipantId`]; the arena's
//! append order is the registry's insertion order. A secondary ordered active
//! set lets batch distribution iterate only currently-active participants, so
//! its cost tracks the active count rather than every address that has ever
//! staked.
//!
//! The whole state is `Clone`: public operations in [`crate::engine`] clone it
//! on entry and restore the clone on failure, giving each operation
//! all-or-nothing semantics.

use crate::error::EngineError;
use crate::participant::{Participant, ParticipantId};
use std::collections::{BTreeSet, HashMap};
use stakepool_types::{Address, Period, SCALE};

/// The complete ledger state of one pool.
#[derive(Clone, Debug, Default)]
pub struct PoolState {
    /// Participant records, in first-deposit order.
    participants: Vec<Participant>,
    /// Addresses parallel to `participants` — the append-only registry.
    addresses: Vec<Address>,
    /// Address → arena index.
    index: HashMap<Address, ParticipantId>,
    /// Ids of currently active participants, ordered by insertion (id order).
    active: BTreeSet<ParticipantId>,
    /// Sum of all participants' `stake_amount`.
    total_staked: u128,
}

impl PoolState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a participant by address.
    pub fn lookup(&self, address: &Address) -> Option<ParticipantId> {
        self.index.get(address).copied()
    }

    /// Get the id for `address`, registering a fresh record on first sight.
    ///
    /// Registration appends to the arena exactly once per address and marks
    /// the record `has_ever_staked`.
    pub fn get_or_register(&mut self, address: &Address) -> ParticipantId {
        if let Some(id) = self.lookup(address) {
            return id;
        }
        let id = self.participants.len() as ParticipantId;
        let mut record = Participant::new();
        record.has_ever_staked = true;
        self.participants.push(record);
        self.addresses.push(address.clone());
        self.index.insert(address.clone(), id);
        id
    }

    pub fn participant(&self, id: ParticipantId) -> &Participant {
        &self.participants[id as usize]
    }

    pub fn participant_mut(&mut self, id: ParticipantId) -> &mut Participant {
        &mut self.participants[id as usize]
    }

    pub fn address_of(&self, id: ParticipantId) -> &Address {
        &self.addresses[id as usize]
    }

    /// Every address that has ever staked, in first-deposit order.
    pub fn registry(&self) -> &[Address] {
        &self.addresses
    }

    /// Ids of currently active participants, in insertion order.
    pub fn active_ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.active.iter().copied()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn total_staked(&self) -> u128 {
        self.total_staked
    }

    /// Credit a deposit to `id`: bumps the stake, the pool total, and the
    /// active set. Caller handles checkpoint/accrual ordering.
    pub fn apply_deposit(&mut self, id: ParticipantId, amount: u128) -> Result<(), EngineError> {
        let record = self.participant_mut(id);
        record.stake_amount = record
            .stake_amount
            .checked_add(amount)
            .ok_or(EngineError::Overflow)?;
        record.is_active = true;
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(EngineError::Overflow)?;
        self.active.insert(id);
        Ok(())
    }

    /// Empty `id`'s stake: zeroes the balance, deactivates, and shrinks the
    /// pool total. Returns the withdrawn balance.
    pub fn apply_withdrawal(&mut self, id: ParticipantId) -> Result<u128, EngineError> {
        let record = self.participant_mut(id);
        let balance = record.stake_amount;
        record.stake_amount = 0;
        record.is_active = false;
        self.total_staked = self
            .total_staked
            .checked_sub(balance)
            .ok_or(EngineError::Overflow)?;
        self.active.remove(&id);
        Ok(balance)
    }

    /// Accrue rewards owed to `id` since its checkpoint, then advance the
    /// checkpoint to `now`.
    ///
    /// Preconditions are hard failures that abort the calling operation:
    /// `now` must be strictly past the checkpoint, and the pool must have a
    /// non-zero staked base. Share and reward are each a floored integer
    /// division at the 10^18 scale, in that order; the dust lost to flooring
    /// is bounded per invocation and never redistributed.
    pub(crate) fn accrue(
        &mut self,
        id: ParticipantId,
        reward_per_period: u128,
        now: Period,
    ) -> Result<(), EngineError> {
        let record = self.participant(id);
        if now <= record.checkpoint {
            return Err(EngineError::NoElapsedPeriods);
        }
        if self.total_staked == 0 {
            return Err(EngineError::NoStakeBase);
        }

        let elapsed = now.elapsed_since(record.checkpoint);
        let share = record
            .stake_amount
            .checked_mul(SCALE)
            .ok_or(EngineError::Overflow)?
            / self.total_staked;
        let reward = reward_per_period
            .checked_mul(elapsed as u128)
            .ok_or(EngineError::Overflow)?
            .checked_mul(share)
            .ok_or(EngineError::Overflow)?
            / SCALE;

        let record = self.participant_mut(id);
        record.pending_reward = record
            .pending_reward
            .checked_add(reward)
            .ok_or(EngineError::Overflow)?;
        record.checkpoint = now;
        Ok(())
    }

    /// Rebuild the derived indices after loading records from storage.
    ///
    /// `records` must be in registry (first-deposit) order. The active set
    /// and pool total are derived, not trusted from storage.
    pub fn from_records(records: Vec<(Address, Participant)>) -> Self {
        let mut state = Self::new();
        for (address, record) in records {
            let id = state.participants.len() as ParticipantId;
            if record.is_active {
                state.active.insert(id);
            }
            state.total_staked += record.stake_amount;
            state.index.insert(address.clone(), id);
            state.addresses.push(address);
            state.participants.push(record);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new(format!("participant-{n}"))
    }

    /// Build a state with the given (address, stake, checkpoint) rows.
    fn state_with(rows: &[(u8, u128, u64)]) -> PoolState {
        let mut state = PoolState::new();
        for &(n, stake, checkpoint) in rows {
            let id = state.get_or_register(&addr(n));
            state.apply_deposit(id, stake).unwrap();
            state.participant_mut(id).checkpoint = Period::new(checkpoint);
        }
        state
    }

    #[test]
    fn registry_appends_once_per_address() {
        let mut state = PoolState::new();
        let a = state.get_or_register(&addr(1));
        let b = state.get_or_register(&addr(2));
        let a_again = state.get_or_register(&addr(1));

        assert_eq!(a, a_again);
        assert_ne!(a, b);
        assert_eq!(state.registry(), &[addr(1), addr(2)]);
        assert!(state.participant(a).has_ever_staked);
    }

    #[test]
    fn accrual_splits_reward_proportionally() {
        // 100 + 300 staked, reward 10^18 per period, 10 periods elapsed:
        // pending must come out at exactly 2.5e18 and 7.5e18.
        let mut state = state_with(&[(1, 100, 5), (2, 300, 5)]);
        let now = Period::new(15);

        state.accrue(0, SCALE, now).unwrap();
        state.accrue(1, SCALE, now).unwrap();

        assert_eq!(state.participant(0).pending_reward, 2_500_000_000_000_000_000);
        assert_eq!(state.participant(1).pending_reward, 7_500_000_000_000_000_000);
        assert_eq!(state.participant(0).checkpoint, now);
        assert_eq!(state.participant(1).checkpoint, now);
    }

    #[test]
    fn accrual_twice_in_one_period_fails_second_time() {
        let mut state = state_with(&[(1, 100, 5)]);
        let now = Period::new(8);

        state.accrue(0, SCALE, now).unwrap();
        let err = state.accrue(0, SCALE, now).unwrap_err();
        assert!(matches!(err, EngineError::NoElapsedPeriods));
    }

    #[test]
    fn accrual_requires_staked_base() {
        let mut state = PoolState::new();
        let id = state.get_or_register(&addr(1));
        state.participant_mut(id).checkpoint = Period::new(1);

        let err = state.accrue(id, SCALE, Period::new(5)).unwrap_err();
        assert!(matches!(err, EngineError::NoStakeBase));
    }

    #[test]
    fn accrual_floors_both_divisions() {
        // stake 1 of total 3: share = floor(1e18 / 3) = 333..333 (18 threes).
        // reward = floor(1e18 * 1 * share / 1e18) = share. The lost third of
        // a unit is dust, not redistributed.
        let mut state = state_with(&[(1, 1, 0), (2, 2, 0)]);
        state.accrue(0, SCALE, Period::new(1)).unwrap();
        assert_eq!(state.participant(0).pending_reward, 333_333_333_333_333_333);
    }

    #[test]
    fn accrual_overflow_is_reported_not_wrapped() {
        let mut state = state_with(&[(1, u128::MAX / SCALE + 1, 0)]);
        let err = state.accrue(0, SCALE, Period::new(1)).unwrap_err();
        assert!(matches!(err, EngineError::Overflow));
    }

    #[test]
    fn withdrawal_empties_stake_and_active_set() {
        let mut state = state_with(&[(1, 500, 1), (2, 200, 1)]);
        let balance = state.apply_withdrawal(0).unwrap();

        assert_eq!(balance, 500);
        assert_eq!(state.total_staked(), 200);
        assert_eq!(state.active_count(), 1);
        assert!(!state.participant(0).is_active);
        // Registry membership survives withdrawal.
        assert_eq!(state.registry().len(), 2);
    }

    #[test]
    fn active_ids_iterate_in_insertion_order() {
        let mut state = state_with(&[(3, 10, 1), (1, 10, 1), (2, 10, 1)]);
        state.apply_withdrawal(1).unwrap();
        let ids: Vec<_> = state.active_ids().collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn from_records_rebuilds_derived_indices() {
        let mut original = state_with(&[(1, 100, 2), (2, 300, 2)]);
        original.apply_withdrawal(0).unwrap();

        let records: Vec<_> = original
            .registry()
            .iter()
            .cloned()
            .zip(original.participants.iter().cloned())
            .collect();
        let rebuilt = PoolState::from_records(records);

        assert_eq!(rebuilt.total_staked(), 300);
        assert_eq!(rebuilt.active_count(), 1);
        assert_eq!(rebuilt.registry(), original.registry());
        assert_eq!(rebuilt.lookup(&addr(2)), Some(1));
    }
}
