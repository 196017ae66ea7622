use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};
use rand::{prelude::StdRng, Rng, SeedableRng};

use crate::token::{issuance, TokenBalance};
use crate::treasury::{
    placeholder_tx_hash, NewTreasuryProposal, TreasuryExecution, TreasuryProposal, TreasuryStatus,
};
use crate::{Error, NewProposal, Proposal, ProposalId, Result, Store, Tally, Vote};

/// Milliseconds since the unix epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Governance proposals and their vote tallies, the community token ledger
/// and the treasury stub, over an injected [`Store`].
///
/// Operations are synchronous read-modify-write; share a ledger between
/// threads through [`crate::SharedLedger`].
#[derive(Debug)]
pub struct Ledger<S: Store> {
    store: S,
    rng: StdRng,
}

impl<S: Store> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    pub fn with_rng(store: S, rng: StdRng) -> Self {
        Ledger { store, rng }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn create_proposal(
        &mut self,
        creator_user_id: &str,
        input: NewProposal,
    ) -> Result<Proposal> {
        self.create_proposal_at(creator_user_id, input, now_millis())
    }

    pub fn create_proposal_at(
        &mut self,
        creator_user_id: &str,
        input: NewProposal,
        created_at: i64,
    ) -> Result<Proposal> {
        input.validate()?;
        let id = ProposalId::generate(created_at, &mut self.rng);
        let proposal = Proposal::new(id, creator_user_id.to_string(), input, created_at);
        self.store.put_proposal(proposal.clone())?;
        info!(
            "[LEDGER] {} created proposal {:?} ({:?})",
            creator_user_id, proposal.id, proposal.proposal_type
        );
        Ok(proposal)
    }

    pub fn proposal(&self, id: &ProposalId) -> Result<Proposal> {
        self.store
            .proposal(id)?
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    /// Newest first. Proposals sharing a timestamp come out most recently
    /// inserted first.
    pub fn list_proposals(&self) -> Result<Vec<Proposal>> {
        let mut proposals = self.store.proposals()?;
        proposals.reverse();
        // stable sort keeps the reversed insertion order among equal timestamps
        proposals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(proposals)
    }

    /// Applies a vote and returns the updated proposal.
    ///
    /// There is no duplicate vote detection and no voter identity; any
    /// caller may vote any number of times. Not safe as an integrity model.
    pub fn vote(&mut self, id: &ProposalId, vote: Vote) -> Result<Proposal> {
        let mut proposal = self.proposal(id)?;
        vote.apply(&mut proposal);
        self.store.put_proposal(proposal.clone())?;
        debug!(
            "[LEDGER] {:?} vote on {:?} weight {}, now {}/{}",
            vote.vote_type,
            id,
            vote.clamped_weight(),
            proposal.votes_for,
            proposal.votes_against
        );
        Ok(proposal)
    }

    pub fn tally(&self, id: &ProposalId) -> Result<Tally> {
        Ok(Tally::count(&self.proposal(id)?))
    }

    pub fn issue_community_tokens(&mut self, address: &str, amount: i64) -> Result<TokenBalance> {
        let balance = self.store.balance(address)?.saturating_add(issuance(amount));
        self.store.set_balance(address, balance)?;
        info!("[LEDGER] issued {} tokens to {}, balance {}", amount, address, balance);
        Ok(TokenBalance {
            address: address.to_string(),
            amount: balance,
        })
    }

    pub fn balance_of(&self, address: &str) -> Result<TokenBalance> {
        Ok(TokenBalance {
            address: address.to_string(),
            amount: self.store.balance(address)?,
        })
    }

    pub fn create_treasury_proposal(
        &mut self,
        input: NewTreasuryProposal,
    ) -> Result<TreasuryProposal> {
        let nonce: [u8; 8] = self.rng.gen();
        let id = hex::encode(nonce);
        let proposal = TreasuryProposal::pending(id, input);
        self.store.put_treasury_proposal(proposal.clone())?;
        info!("[LEDGER] treasury proposal {} pending", proposal.id);
        Ok(proposal)
    }

    pub fn treasury_proposal(&self, id: &str) -> Result<Option<TreasuryProposal>> {
        self.store.treasury_proposal(id)
    }

    /// Marks the treasury proposal executed and returns a placeholder
    /// transaction hash. Unknown ids succeed too, and no vote is consulted.
    pub fn execute_treasury_proposal(&mut self, id: &str) -> Result<TreasuryExecution> {
        if let Some(mut proposal) = self.store.treasury_proposal(id)? {
            proposal.status = TreasuryStatus::Executed;
            self.store.put_treasury_proposal(proposal)?;
        }
        let tx_hash = placeholder_tx_hash(&mut self.rng);
        info!("[LEDGER] treasury proposal {} executed as {}", id, tx_hash);
        Ok(TreasuryExecution {
            id: id.to_string(),
            status: TreasuryStatus::Executed,
            tx_hash,
        })
    }
}
