//! Pool snapshots — capture every participant record at a point in time.
//!
//! Snapshots are an audit artifact: the hash is computed deterministically
//! from the ledger contents, so two parties holding the same snapshot can
//! verify they agree on the full participant set, stake balances, checkpoints,
//! and pending rewards. They are independent of the per-operation rollback
//! snapshots the engine takes internally.

use serde::{Deserialize, Serialize};

use crate::state::PoolState;
use stakepool_types::{Address, Period};

/// A pool snapshot — the full ledger state at `taken_at`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Hash of this snapshot (Blake2b-256 of the ledger contents).
    pub hash: [u8; 32],
    /// Period at which this snapshot was taken.
    pub taken_at: Period,
    /// Pool total at capture time.
    pub total_staked: u128,
    /// Participant entries, in registry (first-deposit) order.
    pub participants: Vec<ParticipantSnapshot>,
    /// Snapshot version for compatibility.
    pub version: u32,
}

/// One participant's state captured in a snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParticipantSnapshot {
    pub address: Address,
    pub stake_amount: u128,
    pub checkpoint: Period,
    pub pending_reward: u128,
    pub has_ever_staked: bool,
    pub is_active: bool,
}

impl PoolSnapshot {
    /// Capture the current ledger state.
    pub fn capture(state: &PoolState, taken_at: Period) -> Self {
        let participants = state
            .registry()
            .iter()
            .map(|address| {
                let id = state.lookup(address).expect("registry address must resolve");
                let record = state.participant(id);
                ParticipantSnapshot {
                    address: address.clone(),
                    stake_amount: record.stake_amount,
                    checkpoint: record.checkpoint,
                    pending_reward: record.pending_reward,
                    has_ever_staked: record.has_ever_staked,
                    is_active: record.is_active,
                }
            })
            .collect();

        let mut snap = Self {
            hash: [0u8; 32],
            taken_at,
            total_staked: state.total_staked(),
            participants,
            version: 1,
        };
        snap.hash = snap.compute_hash();
        snap
    }

    /// Compute the Blake2b-256 hash of this snapshot deterministically.
    fn compute_hash(&self) -> [u8; 32] {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let mut hasher = Blake2b::<U32>::new();
        for entry in &self.participants {
            hasher.update(entry.address.as_str().as_bytes());
            hasher.update(entry.stake_amount.to_le_bytes());
            hasher.update(entry.checkpoint.as_u64().to_le_bytes());
            hasher.update(entry.pending_reward.to_le_bytes());
            hasher.update([entry.has_ever_staked as u8, entry.is_active as u8]);
        }
        hasher.update(self.total_staked.to_le_bytes());
        hasher.update(self.taken_at.as_u64().to_le_bytes());

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the snapshot hash matches the captured data.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    /// Number of participants in this snapshot.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}
