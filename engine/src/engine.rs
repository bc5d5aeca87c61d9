//! The staking pool — public operations over the ledger state.
//!
//! Four externally invocable operations (deposit, withdraw, claim, batch
//! distribution) built around one internal algorithm, the checkpointed accrual
//! in [`PoolState::accrue`]. Every operation takes the current period from the
//! caller and runs atomically: the ledger state is snapshotted on entry and
//! restored on any failure, so external collaborator failures and precondition
//! failures are indistinguishable to observers. Events fire only after commit.

use crate::asset::{RewardMint, StakeAsset};
use crate::error::EngineError;
use crate::events::{EventBus, PoolEvent};
use crate::participant::Participant;
use crate::snapshot::PoolSnapshot;
use crate::state::PoolState;
use stakepool_store::PoolStore;
use stakepool_types::{Address, Period, PoolParams};

/// Meta keys used for persistence.
const META_OWNER: &[u8] = b"owner";
const META_CUSTODY: &[u8] = b"custody";
const META_PARAMS: &[u8] = b"params";
const META_REGISTRY: &[u8] = b"registry";

/// A staking pool: ledger, registry, and reward accrual for one asset pair.
pub struct StakingPool {
    owner: Address,
    custody: Address,
    params: PoolParams,
    state: PoolState,
    bus: EventBus,
}

impl std::fmt::Debug for StakingPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StakingPool")
            .field("owner", &self.owner)
            .field("custody", &self.custody)
            .field("params", &self.params)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl StakingPool {
    /// Create an empty pool. `owner` is the only identity allowed to trigger
    /// batch distribution; `custody` is the account deposits are moved into.
    /// Both are fixed for the pool's lifetime.
    pub fn new(owner: Address, custody: Address, params: PoolParams) -> Self {
        Self {
            owner,
            custody,
            params,
            state: PoolState::new(),
            bus: EventBus::new(),
        }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn custody(&self) -> &Address {
        &self.custody
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    /// Subscribe to committed pool events.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&PoolEvent) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    // ── Views ────────────────────────────────────────────────────────────

    pub fn total_staked(&self) -> u128 {
        self.state.total_staked()
    }

    /// Every address that has ever staked, in first-deposit order.
    pub fn registry(&self) -> &[Address] {
        self.state.registry()
    }

    pub fn active_count(&self) -> usize {
        self.state.active_count()
    }

    pub fn stake_of(&self, address: &Address) -> u128 {
        self.state
            .lookup(address)
            .map(|id| self.state.participant(id).stake_amount)
            .unwrap_or(0)
    }

    pub fn pending_reward_of(&self, address: &Address) -> u128 {
        self.state
            .lookup(address)
            .map(|id| self.state.participant(id).pending_reward)
            .unwrap_or(0)
    }

    pub fn checkpoint_of(&self, address: &Address) -> Option<Period> {
        self.state
            .lookup(address)
            .map(|id| self.state.participant(id).checkpoint)
    }

    pub fn is_active(&self, address: &Address) -> bool {
        self.state
            .lookup(address)
            .map(|id| self.state.participant(id).is_active)
            .unwrap_or(false)
    }

    // ── Operations ───────────────────────────────────────────────────────

    /// Deposit `amount` of the staked asset for `caller`.
    ///
    /// Rewards owed for already-elapsed periods are accrued at the
    /// pre-deposit balance. A caller entering at zero stake (first-ever
    /// deposit, or re-entry after a full withdrawal) gets its checkpoint reset
    /// to `now` instead — no reward is ever credited for periods the caller
    /// held nothing. A refused custody transfer aborts the whole deposit with
    /// no state change.
    pub fn deposit(
        &mut self,
        caller: &Address,
        amount: u128,
        now: Period,
        asset: &mut dyn StakeAsset,
    ) -> Result<(), EngineError> {
        let rollback = self.state.clone();
        match self.deposit_inner(caller, amount, now, asset) {
            Ok(()) => {
                tracing::debug!(participant = %caller, amount, period = %now, "deposit committed");
                self.bus.emit(&PoolEvent::Deposit {
                    participant: caller.clone(),
                    amount,
                });
                Ok(())
            }
            Err(e) => {
                self.state = rollback;
                tracing::debug!(participant = %caller, error = %e, "deposit rolled back");
                Err(e)
            }
        }
    }

    fn deposit_inner(
        &mut self,
        caller: &Address,
        amount: u128,
        now: Period,
        asset: &mut dyn StakeAsset,
    ) -> Result<(), EngineError> {
        if amount == 0 {
            return Err(EngineError::InvalidAmount);
        }

        let id = self.state.get_or_register(caller);
        if self.state.participant(id).stake_amount == 0 {
            // Entering at zero stake: nothing to accrue, the checkpoint
            // restarts here.
            self.state.participant_mut(id).checkpoint = now;
        } else {
            self.state.accrue(id, self.params.reward_per_period, now)?;
        }
        self.state.apply_deposit(id, amount)?;

        // External call last: every ledger mutation above can still be rolled
        // back, but a completed custody transfer cannot.
        asset.transfer_from(caller, &self.custody, amount)?;
        Ok(())
    }

    /// Withdraw `caller`'s entire staked balance.
    ///
    /// Accrual runs before the balance is touched, so the full elapsed window
    /// is rewarded at the pre-withdrawal stake. The record survives with a
    /// zero balance. Claiming requires an active stake, so claim before
    /// withdrawing; pending rewards left behind stay on the record and become
    /// claimable again after a re-deposit.
    pub fn withdraw(
        &mut self,
        caller: &Address,
        now: Period,
        asset: &mut dyn StakeAsset,
    ) -> Result<u128, EngineError> {
        let rollback = self.state.clone();
        match self.withdraw_inner(caller, now, asset) {
            Ok(balance) => {
                tracing::debug!(participant = %caller, amount = balance, period = %now, "withdrawal committed");
                self.bus.emit(&PoolEvent::Withdraw {
                    participant: caller.clone(),
                    amount: balance,
                });
                Ok(balance)
            }
            Err(e) => {
                self.state = rollback;
                tracing::debug!(participant = %caller, error = %e, "withdrawal rolled back");
                Err(e)
            }
        }
    }

    fn withdraw_inner(
        &mut self,
        caller: &Address,
        now: Period,
        asset: &mut dyn StakeAsset,
    ) -> Result<u128, EngineError> {
        let id = self.state.lookup(caller).ok_or(EngineError::NotStaking)?;
        if !self.state.participant(id).is_active {
            return Err(EngineError::NotStaking);
        }
        if self.state.participant(id).stake_amount == 0 {
            return Err(EngineError::InsufficientStake);
        }

        self.state.accrue(id, self.params.reward_per_period, now)?;
        let balance = self.state.apply_withdrawal(id)?;
        asset.transfer(caller, balance)?;
        Ok(balance)
    }

    /// Claim `caller`'s pending rewards; the full pending amount is minted.
    ///
    /// The pending counter is reset before the mint is requested, but a mint
    /// failure rolls the reset back — rewards are never silently lost.
    pub fn claim(
        &mut self,
        caller: &Address,
        now: Period,
        mint: &mut dyn RewardMint,
    ) -> Result<u128, EngineError> {
        let rollback = self.state.clone();
        match self.claim_inner(caller, now, mint) {
            Ok(amount) => {
                tracing::debug!(participant = %caller, amount, period = %now, "claim committed");
                self.bus.emit(&PoolEvent::RewardsClaimed {
                    participant: caller.clone(),
                    amount,
                });
                Ok(amount)
            }
            Err(e) => {
                self.state = rollback;
                tracing::debug!(participant = %caller, error = %e, "claim rolled back");
                Err(e)
            }
        }
    }

    fn claim_inner(
        &mut self,
        caller: &Address,
        now: Period,
        mint: &mut dyn RewardMint,
    ) -> Result<u128, EngineError> {
        let id = self.state.lookup(caller).ok_or(EngineError::NotStaking)?;
        if !self.state.participant(id).is_active {
            return Err(EngineError::NotStaking);
        }

        self.state.accrue(id, self.params.reward_per_period, now)?;
        let pending = self.state.participant(id).pending_reward;
        if pending == 0 {
            return Err(EngineError::NoRewardsPending);
        }
        self.state.participant_mut(id).pending_reward = 0;
        mint.mint(caller, pending)?;
        Ok(pending)
    }

    /// Owner-only sweep: accrue rewards for every currently active
    /// participant, in registry insertion order.
    ///
    /// No per-item isolation — if any single accrual fails (for example a
    /// participant already accrued this period by an interleaved operation),
    /// the whole sweep fails and no partial progress persists.
    pub fn distribute(&mut self, caller: &Address, now: Period) -> Result<(), EngineError> {
        let rollback = self.state.clone();
        match self.distribute_inner(caller, now) {
            Ok(()) => {
                tracing::info!(active = self.state.active_count(), period = %now, "distribution completed");
                self.bus.emit(&PoolEvent::RewardsDistributed);
                Ok(())
            }
            Err(e) => {
                self.state = rollback;
                tracing::debug!(error = %e, "distribution rolled back");
                Err(e)
            }
        }
    }

    fn distribute_inner(&mut self, caller: &Address, now: Period) -> Result<(), EngineError> {
        if caller != &self.owner {
            return Err(EngineError::NotOwner);
        }
        let active: Vec<_> = self.state.active_ids().collect();
        for id in active {
            self.state.accrue(id, self.params.reward_per_period, now)?;
        }
        Ok(())
    }

    // ── Persistence ──────────────────────────────────────────────────────

    /// Capture a deterministic, hash-verified snapshot of the ledger.
    pub fn snapshot(&self, taken_at: Period) -> PoolSnapshot {
        PoolSnapshot::capture(&self.state, taken_at)
    }

    /// Persist the whole pool to a store.
    pub fn save_to_store(&self, store: &dyn PoolStore) -> Result<(), EngineError> {
        store
            .put_meta(META_OWNER, self.owner.as_str().as_bytes())
            .map_err(storage)?;
        store
            .put_meta(META_CUSTODY, self.custody.as_str().as_bytes())
            .map_err(storage)?;

        let params = bincode::serialize(&self.params).map_err(storage)?;
        store.put_meta(META_PARAMS, &params).map_err(storage)?;

        // Registry order is state, not derivable from the unordered
        // per-participant records.
        let registry = bincode::serialize(self.state.registry()).map_err(storage)?;
        store.put_meta(META_REGISTRY, &registry).map_err(storage)?;

        for address in self.state.registry() {
            let id = self
                .state
                .lookup(address)
                .expect("registry address must resolve");
            let bytes = bincode::serialize(self.state.participant(id)).map_err(storage)?;
            store.put_participant(address, &bytes).map_err(storage)?;
        }
        Ok(())
    }

    /// Restore a pool from a store previously written by [`save_to_store`].
    ///
    /// The active set and pool total are rebuilt from the records rather than
    /// trusted from storage.
    ///
    /// [`save_to_store`]: StakingPool::save_to_store
    pub fn load_from_store(store: &dyn PoolStore) -> Result<Self, EngineError> {
        let owner = Address::new(meta_string(store, META_OWNER)?);
        let custody = Address::new(meta_string(store, META_CUSTODY)?);

        let params_bytes = require_meta(store, META_PARAMS)?;
        let params: PoolParams = bincode::deserialize(&params_bytes).map_err(storage)?;

        let registry_bytes = require_meta(store, META_REGISTRY)?;
        let registry: Vec<Address> = bincode::deserialize(&registry_bytes).map_err(storage)?;

        let mut records = Vec::with_capacity(registry.len());
        for address in registry {
            let bytes = store
                .get_participant(&address)
                .map_err(storage)?
                .ok_or_else(|| {
                    EngineError::Storage(format!("missing participant record for {address}"))
                })?;
            let record: Participant = bincode::deserialize(&bytes).map_err(storage)?;
            records.push((address, record));
        }

        Ok(Self {
            owner,
            custody,
            params,
            state: PoolState::from_records(records),
            bus: EventBus::new(),
        })
    }
}

fn storage(e: impl std::fmt::Display) -> EngineError {
    EngineError::Storage(e.to_string())
}

fn require_meta(store: &dyn PoolStore, key: &[u8]) -> Result<Vec<u8>, EngineError> {
    store
        .get_meta(key)
        .map_err(storage)?
        .ok_or_else(|| EngineError::Storage(format!("missing meta key {:?}", key)))
}

fn meta_string(store: &dyn PoolStore, key: &[u8]) -> Result<String, EngineError> {
    let bytes = require_meta(store, key)?;
    String::from_utf8(bytes).map_err(storage)
}
