//! VotePlatform Chain Module
//!
//! Versioned HTTP client for the governance test network plus the sync
//! adapter that pushes referendum status back into the proposal store.
//! Wallet signing stays outside this crate: callers hand in pre-signed
//! extrinsics, and the analytics/explorer enrichment APIs are likewise
//! external collaborators.

pub mod client;
pub mod config;
pub mod error;
pub mod sync;

pub use client::{
    ChainClient, ReferendumInfo, ReferendumSubmission, RemarkSubmission, SpendSubmission,
};
pub use config::{ChainConfig, ConfigError, Network};
pub use error::{ChainError, Result};
pub use sync::{ChainSyncAdapter, ProposalSubmission};
