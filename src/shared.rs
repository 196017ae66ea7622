use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::token::TokenBalance;
use crate::treasury::{NewTreasuryProposal, TreasuryExecution, TreasuryProposal};
use crate::{Ledger, NewProposal, Proposal, ProposalId, Result, Store, Tally, Vote};

/// Cloneable handle to a [`Ledger`] for multi-threaded hosts.
///
/// Every call holds one lock for its whole read-modify-write, so concurrent
/// votes on the same proposal are never lost.
#[derive(Debug)]
pub struct SharedLedger<S: Store> {
    inner: Arc<Mutex<Ledger<S>>>,
}

impl<S: Store> Clone for SharedLedger<S> {
    fn clone(&self) -> Self {
        SharedLedger {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Store> From<Ledger<S>> for SharedLedger<S> {
    fn from(ledger: Ledger<S>) -> Self {
        SharedLedger {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }
}

impl<S: Store> SharedLedger<S> {
    pub fn new(store: S) -> Self {
        Ledger::new(store).into()
    }

    // each operation mutates the store with a single put, so a poisoned
    // ledger is still consistent
    fn lock(&self) -> MutexGuard<'_, Ledger<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create_proposal(&self, creator_user_id: &str, input: NewProposal) -> Result<Proposal> {
        self.lock().create_proposal(creator_user_id, input)
    }

    pub fn proposal(&self, id: &ProposalId) -> Result<Proposal> {
        self.lock().proposal(id)
    }

    pub fn list_proposals(&self) -> Result<Vec<Proposal>> {
        self.lock().list_proposals()
    }

    pub fn vote(&self, id: &ProposalId, vote: Vote) -> Result<Proposal> {
        self.lock().vote(id, vote)
    }

    pub fn tally(&self, id: &ProposalId) -> Result<Tally> {
        self.lock().tally(id)
    }

    pub fn issue_community_tokens(&self, address: &str, amount: i64) -> Result<TokenBalance> {
        self.lock().issue_community_tokens(address, amount)
    }

    pub fn balance_of(&self, address: &str) -> Result<TokenBalance> {
        self.lock().balance_of(address)
    }

    pub fn create_treasury_proposal(&self, input: NewTreasuryProposal) -> Result<TreasuryProposal> {
        self.lock().create_treasury_proposal(input)
    }

    pub fn execute_treasury_proposal(&self, id: &str) -> Result<TreasuryExecution> {
        self.lock().execute_treasury_proposal(id)
    }
}
