use serde::{Deserialize, Serialize};

use crate::{Proposal, ProposalId};

/// Cumulative for/against weight of a proposal and its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub proposal_id: ProposalId,
    #[serde(rename = "for")]
    pub votes_for: u64,
    #[serde(rename = "against")]
    pub votes_against: u64,
    pub passed: bool,
}

impl Tally {
    pub fn count(proposal: &Proposal) -> Self {
        Tally {
            proposal_id: proposal.id.clone(),
            votes_for: proposal.votes_for,
            votes_against: proposal.votes_against,
            // a tie does not pass
            passed: proposal.votes_for > proposal.votes_against,
        }
    }
}
