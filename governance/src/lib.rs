//! VotePlatform Governance Module
//!
//! Client-side source of truth for proposals and their votes: an
//! in-memory catalog persisted as a whole JSON snapshot on every mutation,
//! with a subscriber fan-out so views re-read state after each change.

pub mod error;
pub mod proposal;
pub mod store;
pub mod voting;

pub use error::{GovernanceError, Result};
pub use proposal::{Proposal, ProposalDraft, ProposalStatus, ReferendumUpdate};
pub use store::{ProposalStore, PROPOSALS_KEY};
pub use voting::{Vote, VoteRecord};

/// Governance configuration constants
pub mod config {
    /// Minimum number of voting options on a proposal
    pub const MIN_OPTIONS: usize = 2;

    /// Maximum number of voting options on a proposal
    pub const MAX_OPTIONS: usize = 6;
}
