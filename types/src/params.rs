//! Pool parameters.

use serde::{Deserialize, Serialize};

/// Fixed-point scale for share arithmetic: 10^18.
///
/// A participant's pool share is expressed as a fraction of `SCALE`, and the
/// per-period reward is apportioned by multiplying with that fraction and
/// dividing back down. Both divisions floor; the rounding dust is accepted,
/// never redistributed.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Parameters fixed at pool construction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PoolParams {
    /// Total reward minted per period across all participants, in raw units
    /// of the reward asset.
    pub reward_per_period: u128,
}

impl PoolParams {
    pub fn new(reward_per_period: u128) -> Self {
        Self { reward_per_period }
    }
}

/// Default is one whole reward token (at 10^18 raw units) per period.
impl Default for PoolParams {
    fn default() -> Self {
        Self {
            reward_per_period: SCALE,
        }
    }
}
