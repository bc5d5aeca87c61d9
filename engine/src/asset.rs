//! External asset collaborators.
//!
//! The engine does not hold tokens itself. Custody movement of the staked
//! asset and minting of the reward asset are delegated to the embedding
//! environment through these traits; test doubles live in
//! `stakepool-nullables`. Calls are synchronous inside the operation's atomic
//! boundary — a failure here aborts and rolls back the whole operation,
//! exactly like an internal precondition failure.

use stakepool_types::Address;
use thiserror::Error;

/// Failure reported by an external asset interface.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct AssetError(pub String);

/// Custody interface for the staked asset.
pub trait StakeAsset {
    /// Move `amount` from `from` into the pool's custody account `to`.
    fn transfer_from(&mut self, from: &Address, to: &Address, amount: u128)
        -> Result<(), AssetError>;

    /// Move `amount` out of custody back to `to`.
    fn transfer(&mut self, to: &Address, amount: u128) -> Result<(), AssetError>;
}

/// Mint capability for the reward asset.
pub trait RewardMint {
    /// Create `amount` new reward units owned by `to`.
    fn mint(&mut self, to: &Address, amount: u128) -> Result<(), AssetError>;
}
