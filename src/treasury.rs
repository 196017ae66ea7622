use serde::{Deserialize, Serialize};

use rand::Rng;

/// Treasury proposals are a simulation: execution is not gated on any vote
/// and produces a placeholder transaction hash, never an on-chain action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreasuryStatus {
    Pending,
    Executed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTreasuryProposal {
    pub title: String,
    pub amount: u64,
    pub to: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryProposal {
    pub id: String,
    pub title: String,
    pub amount: u64,
    pub to: String,
    pub reason: String,
    pub status: TreasuryStatus,
}

impl TreasuryProposal {
    pub fn pending(id: String, input: NewTreasuryProposal) -> Self {
        TreasuryProposal {
            id,
            title: input.title,
            amount: input.amount,
            to: input.to,
            reason: input.reason,
            status: TreasuryStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryExecution {
    pub id: String,
    pub status: TreasuryStatus,
    pub tx_hash: String,
}

/// 32 random bytes, hex encoded (64 characters).
pub fn placeholder_tx_hash(rng: &mut impl Rng) -> String {
    let bytes: [u8; 32] = rng.gen();
    hex::encode(bytes)
}
