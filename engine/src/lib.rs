//! Staking ledger & reward accrual engine.
//!
//! Participants deposit a fungible asset into a shared pool; a fixed reward
//! budget is minted per period and split among active depositors in proportion
//! to their pool share. Accrual is checkpointed, never recomputed from
//! scratch:
//!
//! `reward(p) = reward_per_period × elapsed × share(p) / SCALE`
//!
//! where `share(p) = stake(p) × SCALE / total_staked`, both divisions floored.
//!
//! This crate handles:
//! - Stake bookkeeping (deposit/withdraw) and the append-only registry
//! - Per-participant checkpointed reward accrual
//! - Claim settlement against an external reward mint
//! - Owner-triggered batch accrual over the active set
//!
//! Asset custody and reward minting are external collaborators behind the
//! traits in [`asset`]; the period clock is supplied by the caller on every
//! operation. Each public operation is atomic over the ledger state: snapshot
//! on entry, commit on success, restore on any failure.

pub mod asset;
pub mod engine;
pub mod error;
pub mod events;
pub mod participant;
pub mod snapshot;
pub mod state;

pub use asset::{AssetError, RewardMint, StakeAsset};
pub use engine::StakingPool;
pub use error::EngineError;
pub use events::{EventBus, PoolEvent};
pub use participant::{Participant, ParticipantId};
pub use snapshot::{ParticipantSnapshot, PoolSnapshot};
pub use state::PoolState;
