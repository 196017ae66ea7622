use core::fmt::{self, Debug, Display};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Opaque proposal identifier: a hex creation-time prefix followed by a
/// random hex suffix.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(String);

impl ProposalId {
    pub fn generate(created_at: i64, rng: &mut impl Rng) -> Self {
        let nonce: [u8; 8] = rng.gen();
        ProposalId(format!("{:x}-{}", created_at, hex::encode(nonce)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProposalId {
    fn from(id: &str) -> Self {
        ProposalId(id.to_string())
    }
}

impl From<String> for ProposalId {
    fn from(id: String) -> Self {
        ProposalId(id)
    }
}

impl Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalType {
    Governance,
    Feature,
    Community,
}

/// Caller supplied fields of a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProposal {
    pub title: String,
    pub description: String,
    pub proposal_type: ProposalType,
}

impl NewProposal {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("proposal title must not be empty".into()));
        }
        Ok(())
    }
}

/// A governance proposal. Everything except the two vote accumulators is
/// fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: ProposalId,
    pub creator_user_id: String,
    pub title: String,
    pub description: String,
    pub proposal_type: ProposalType,
    pub created_at: i64,
    pub votes_for: u64,
    pub votes_against: u64,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        creator_user_id: String,
        input: NewProposal,
        created_at: i64,
    ) -> Self {
        Proposal {
            id,
            creator_user_id,
            title: input.title,
            description: input.description,
            proposal_type: input.proposal_type,
            created_at,
            votes_for: 0,
            votes_against: 0,
        }
    }
}
