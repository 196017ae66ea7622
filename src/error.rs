use thiserror::Error;

use crate::ProposalId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("We experienced an IO error")]
    IO(#[from] std::io::Error),
    #[error("Failed to encode with bincode")]
    Encoding(#[from] bincode::Error),
    #[error("Proposal {0} does not exist")]
    NotFound(ProposalId),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// The status a request handler should answer with when this error
    /// escapes a ledger operation.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::InvalidInput(_) => 400,
            Error::IO(_) | Error::Encoding(_) => 500,
        }
    }
}
