//! Vote record types
//!
//! Votes are denormalized twice, as in the snapshot layout: once keyed by
//! voter inside each proposal, once in a flat append log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-voter entry stored inside a proposal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteRecord {
    pub option: String,
    pub timestamp: DateTime<Utc>,
    pub voter: String,
}

/// Flat append-log entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vote {
    pub proposal_id: String,
    pub option: String,
    pub voter: String,
    pub timestamp: DateTime<Utc>,
}
