use serde::{Deserialize, Serialize};

/// Community token balance of an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub address: String,
    pub amount: u64,
}

/// Issuance only ever adds. A negative amount contributes nothing.
pub fn issuance(amount: i64) -> u64 {
    amount.max(0) as u64
}
