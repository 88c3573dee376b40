//! Chain client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Client not connected; call connect() first")]
    NotConnected,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Node rejected request ({status}): {message}")]
    Node { status: u16, message: String },

    #[error("No local proposal with id {0}")]
    UnknownProposal(String),

    #[error("Store error: {0}")]
    Store(#[from] governance::GovernanceError),
}

pub type Result<T> = std::result::Result<T, ChainError>;
