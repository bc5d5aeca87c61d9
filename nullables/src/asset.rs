//! Nullable asset interfaces — custody and mint doubles with programmable
//! failure.

use stakepool_engine::{AssetError, RewardMint, StakeAsset};
use stakepool_types::Address;

/// A recording double for both external asset interfaces.
///
/// Records every custody movement and mint so tests can assert on exact
/// amounts; `refuse_transfers` / `refuse_mints` make the next calls report
/// failure the way a real token contract would.
pub struct NullAsset {
    /// (from, to, amount) for every accepted `transfer_from`.
    deposits: Vec<(Address, Address, u128)>,
    /// (to, amount) for every accepted `transfer`.
    payouts: Vec<(Address, u128)>,
    /// (to, amount) for every accepted `mint`.
    mints: Vec<(Address, u128)>,
    refuse_transfers: bool,
    refuse_mints: bool,
}

impl NullAsset {
    pub fn new() -> Self {
        Self {
            deposits: Vec::new(),
            payouts: Vec::new(),
            mints: Vec::new(),
            refuse_transfers: false,
            refuse_mints: false,
        }
    }

    /// Make subsequent custody transfers report failure.
    pub fn refuse_transfers(&mut self, refuse: bool) {
        self.refuse_transfers = refuse;
    }

    /// Make subsequent mints report failure.
    pub fn refuse_mints(&mut self, refuse: bool) {
        self.refuse_mints = refuse;
    }

    pub fn deposits(&self) -> &[(Address, Address, u128)] {
        &self.deposits
    }

    pub fn payouts(&self) -> &[(Address, u128)] {
        &self.payouts
    }

    pub fn mints(&self) -> &[(Address, u128)] {
        &self.mints
    }

    /// Total reward ever minted to `address`.
    pub fn minted_to(&self, address: &Address) -> u128 {
        self.mints
            .iter()
            .filter(|(to, _)| to == address)
            .map(|(_, amount)| amount)
            .sum()
    }
}

impl Default for NullAsset {
    fn default() -> Self {
        Self::new()
    }
}

impl StakeAsset for NullAsset {
    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError> {
        if self.refuse_transfers {
            return Err(AssetError("transfer refused".into()));
        }
        self.deposits.push((from.clone(), to.clone(), amount));
        Ok(())
    }

    fn transfer(&mut self, to: &Address, amount: u128) -> Result<(), AssetError> {
        if self.refuse_transfers {
            return Err(AssetError("transfer refused".into()));
        }
        self.payouts.push((to.clone(), amount));
        Ok(())
    }
}

impl RewardMint for NullAsset {
    fn mint(&mut self, to: &Address, amount: u128) -> Result<(), AssetError> {
        if self.refuse_mints {
            return Err(AssetError("mint refused".into()));
        }
        self.mints.push((to.clone(), amount));
        Ok(())
    }
}
