//! Governance error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GovernanceError {
    #[error("Proposal needs between {min} and {max} options, got {got}")]
    InvalidOptionCount {
        min: usize,
        max: usize,
        got: usize,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] vote_storage::StorageError),
}

pub type Result<T> = std::result::Result<T, GovernanceError>;
