use serde::{Deserialize, Serialize};

use crate::Proposal;

pub const MIN_VOTE_WEIGHT: u64 = 1;
pub const MAX_VOTE_WEIGHT: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    For,
    Against,
}

/// A single vote as received from a caller. Votes are not recorded as
/// entities, they are folded straight into the proposal's accumulators.
///
/// Nothing binds a vote to a voter: the same caller may vote any number of
/// times. Do not rely on the tally for integrity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub vote_type: VoteType,
    pub weight: Option<i64>,
}

impl Vote {
    pub fn new(vote_type: VoteType) -> Self {
        Vote {
            vote_type,
            weight: None,
        }
    }

    pub fn weighted(vote_type: VoteType, weight: i64) -> Self {
        Vote {
            vote_type,
            weight: Some(weight),
        }
    }

    /// The weight actually applied, within `[MIN_VOTE_WEIGHT, MAX_VOTE_WEIGHT]`.
    pub fn clamped_weight(&self) -> u64 {
        match self.weight {
            None => MIN_VOTE_WEIGHT,
            Some(w) if w < MIN_VOTE_WEIGHT as i64 => MIN_VOTE_WEIGHT,
            Some(w) => (w as u64).min(MAX_VOTE_WEIGHT),
        }
    }

    pub fn apply(&self, proposal: &mut Proposal) {
        let weight = self.clamped_weight();
        match self.vote_type {
            VoteType::For => proposal.votes_for += weight,
            VoteType::Against => proposal.votes_against += weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_is_clamped() {
        assert_eq!(Vote::weighted(VoteType::For, 0).clamped_weight(), 1);
        assert_eq!(Vote::weighted(VoteType::For, -7).clamped_weight(), 1);
        assert_eq!(Vote::weighted(VoteType::For, 5000).clamped_weight(), 1000);
        assert_eq!(Vote::weighted(VoteType::For, 1000).clamped_weight(), 1000);
        assert_eq!(Vote::weighted(VoteType::For, 42).clamped_weight(), 42);
        assert_eq!(Vote::new(VoteType::Against).clamped_weight(), 1);
    }
}
