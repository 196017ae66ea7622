//! Governance and discovery logic for the DeSocialAI network.
//!
//! [`Ledger`] holds DAO proposals with weighted for/against tallies, the
//! community token ledger and a treasury stub. [`trending`] ranks hashtags
//! found in a snapshot of posts.

pub mod ledger;
pub mod shared;
pub mod store;
pub mod token;
pub mod treasury;
pub mod trending;

pub mod error;
pub use crate::error::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub mod proposal;
pub use crate::proposal::{NewProposal, Proposal, ProposalId, ProposalType};

pub mod vote;
pub use crate::vote::{Vote, VoteType, MAX_VOTE_WEIGHT, MIN_VOTE_WEIGHT};

pub mod vote_count;
pub use crate::vote_count::Tally;

pub use crate::ledger::Ledger;
pub use crate::shared::SharedLedger;
pub use crate::store::{FileStore, MemoryStore, Store};
pub use crate::token::TokenBalance;
pub use crate::treasury::{NewTreasuryProposal, TreasuryExecution, TreasuryProposal, TreasuryStatus};
pub use crate::trending::{
    score_hashtags, score_hashtags_at, Category, HashtagStat, Post, DEFAULT_TREND_LIMIT,
};
