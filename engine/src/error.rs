//! Engine-specific errors.
//!
//! Every failure aborts the entire enclosing operation with no partial state
//! change; nothing is recovered internally. Callers resubmit in full.

use crate::asset::AssetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("deposit amount must be non-zero")]
    InvalidAmount,

    #[error("caller has no active stake")]
    NotStaking,

    #[error("operation restricted to the pool owner")]
    NotOwner,

    #[error("staked balance is zero")]
    InsufficientStake,

    #[error("no rewards pending for claim")]
    NoRewardsPending,

    #[error("no periods elapsed since last accrual")]
    NoElapsedPeriods,

    #[error("pool has no staked base to apportion against")]
    NoStakeBase,

    #[error("external transfer failure: {0}")]
    ExternalTransferFailure(#[from] AssetError),

    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error("storage error: {0}")]
    Storage(String),
}
