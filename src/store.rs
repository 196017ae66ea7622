use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{Proposal, ProposalId, Result, TreasuryProposal};

/// Backing storage for a [`crate::Ledger`].
///
/// Proposals are returned in insertion order; re-putting an existing id
/// updates it in place without moving it.
pub trait Store {
    fn put_proposal(&mut self, proposal: Proposal) -> Result<()>;
    fn proposal(&self, id: &ProposalId) -> Result<Option<Proposal>>;
    fn proposals(&self) -> Result<Vec<Proposal>>;

    fn balance(&self, address: &str) -> Result<u64>;
    fn set_balance(&mut self, address: &str, amount: u64) -> Result<()>;

    fn put_treasury_proposal(&mut self, proposal: TreasuryProposal) -> Result<()>;
    fn treasury_proposal(&self, id: &str) -> Result<Option<TreasuryProposal>>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    proposals: Vec<Proposal>,
    index: BTreeMap<ProposalId, usize>,
    balances: BTreeMap<String, u64>,
    treasury: BTreeMap<String, TreasuryProposal>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn put_proposal(&mut self, proposal: Proposal) -> Result<()> {
        match self.index.get(&proposal.id) {
            Some(&i) => self.proposals[i] = proposal,
            None => {
                self.index.insert(proposal.id.clone(), self.proposals.len());
                self.proposals.push(proposal);
            }
        }
        Ok(())
    }

    fn proposal(&self, id: &ProposalId) -> Result<Option<Proposal>> {
        Ok(self.index.get(id).map(|&i| self.proposals[i].clone()))
    }

    fn proposals(&self) -> Result<Vec<Proposal>> {
        Ok(self.proposals.clone())
    }

    fn balance(&self, address: &str) -> Result<u64> {
        Ok(self.balances.get(address).copied().unwrap_or(0))
    }

    fn set_balance(&mut self, address: &str, amount: u64) -> Result<()> {
        self.balances.insert(address.to_string(), amount);
        Ok(())
    }

    fn put_treasury_proposal(&mut self, proposal: TreasuryProposal) -> Result<()> {
        self.treasury.insert(proposal.id.clone(), proposal);
        Ok(())
    }

    fn treasury_proposal(&self, id: &str) -> Result<Option<TreasuryProposal>> {
        Ok(self.treasury.get(id).cloned())
    }
}

/// A [`MemoryStore`] that snapshots itself to disk with bincode after every
/// mutation and reloads the snapshot on open.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: MemoryStore,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = match fs::read(&path) {
            Ok(bytes) => bincode::deserialize(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => MemoryStore::default(),
            Err(e) => return Err(e.into()),
        };
        info!(
            "[STORE] opened {:?} with {} proposals",
            path,
            state.proposals.len()
        );
        Ok(FileStore { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Applies `change` to a copy of the state and writes it out. The live
    /// state is replaced only once the snapshot is on disk.
    fn commit(&mut self, change: impl FnOnce(&mut MemoryStore) -> Result<()>) -> Result<()> {
        let mut next = self.state.clone();
        change(&mut next)?;

        let bytes = bincode::serialize(&next)?;
        let tmp = self.temp_path();
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        debug!("[STORE] wrote {} bytes to {:?}", bytes.len(), self.path);

        self.state = next;
        Ok(())
    }
}

impl Store for FileStore {
    fn put_proposal(&mut self, proposal: Proposal) -> Result<()> {
        self.commit(|state| state.put_proposal(proposal))
    }

    fn proposal(&self, id: &ProposalId) -> Result<Option<Proposal>> {
        self.state.proposal(id)
    }

    fn proposals(&self) -> Result<Vec<Proposal>> {
        self.state.proposals()
    }

    fn balance(&self, address: &str) -> Result<u64> {
        self.state.balance(address)
    }

    fn set_balance(&mut self, address: &str, amount: u64) -> Result<()> {
        self.commit(|state| state.set_balance(address, amount))
    }

    fn put_treasury_proposal(&mut self, proposal: TreasuryProposal) -> Result<()> {
        self.commit(|state| state.put_treasury_proposal(proposal))
    }

    fn treasury_proposal(&self, id: &str) -> Result<Option<TreasuryProposal>> {
        self.state.treasury_proposal(id)
    }
}
