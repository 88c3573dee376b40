//! Proposal types and lifecycle status

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::voting::VoteRecord;

/// Local lifecycle status of a proposal.
///
/// Transitions are monotonic (`Active -> Ended | Executed`) except when a
/// chain-status sync forces the status, see
/// [`ProposalStatus::from_chain_status`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Active,
    Ended,
    Executed,
}

impl ProposalStatus {
    /// Fixed mapping from the node's status vocabulary to the local
    /// lifecycle. The vocabulary is open-ended; unrecognized strings map
    /// to `None` and leave the local status unchanged.
    pub fn from_chain_status(status: &str) -> Option<Self> {
        match status {
            "Ongoing" => Some(Self::Active),
            "Approved" | "Executed" => Some(Self::Executed),
            "Rejected" | "Cancelled" => Some(Self::Ended),
            _ => None,
        }
    }
}

/// Caller-supplied fields for a new proposal. The store derives the id,
/// timestamps, status, and vote bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
    /// Free-text category of the proposal (e.g. "treasury", "general").
    pub proposal_type: String,
    pub category: String,
    /// Voting period length in days.
    pub voting_period: u32,
    /// Minimum participation percentage. Display-only; not enforced.
    pub quorum_threshold: u32,
    /// Delay before execution, in days. Display-only.
    pub execution_delay: u32,
    /// Ordered voting option labels; between 2 and 6 entries.
    pub options: Vec<String>,
    pub rationale: String,
    pub implementation: String,
}

/// Chain linkage recorded once a proposal has been submitted as a
/// referendum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferendumUpdate {
    pub referendum_id: u32,
    pub track_id: Option<u32>,
    pub on_chain_status: Option<String>,
    pub beneficiary_address: Option<String>,
    pub amount: Option<u128>,
    pub call_data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub proposal_type: String,
    pub category: String,
    pub voting_period: u32,
    pub quorum_threshold: u32,
    pub execution_delay: u32,
    pub options: Vec<String>,
    pub rationale: String,
    pub implementation: String,
    pub created_at: DateTime<Utc>,
    /// Always `created_at + voting_period` days.
    pub end_date: DateTime<Utc>,
    pub status: ProposalStatus,
    /// One entry per voter; the first vote is final.
    pub votes: HashMap<String, VoteRecord>,
    /// Always equal to `votes.len()`.
    pub total_votes: usize,

    // Chain integration fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referendum_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_chain_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_data: Option<String>,
}

impl Proposal {
    /// Build a proposal from a draft at the given creation time.
    pub fn from_draft(id: String, draft: ProposalDraft, now: DateTime<Utc>) -> Self {
        let end_date = now + Duration::days(i64::from(draft.voting_period));

        Self {
            id,
            title: draft.title,
            description: draft.description,
            proposal_type: draft.proposal_type,
            category: draft.category,
            voting_period: draft.voting_period,
            quorum_threshold: draft.quorum_threshold,
            execution_delay: draft.execution_delay,
            options: draft.options,
            rationale: draft.rationale,
            implementation: draft.implementation,
            created_at: now,
            end_date,
            status: ProposalStatus::Active,
            votes: HashMap::new(),
            total_votes: 0,
            referendum_id: None,
            track_id: None,
            on_chain_status: None,
            beneficiary_address: None,
            amount: None,
            call_data: None,
        }
    }

    /// A vote is accepted only while the proposal is active and the
    /// voting period has not elapsed.
    pub fn accepts_votes_at(&self, now: DateTime<Utc>) -> bool {
        self.status == ProposalStatus::Active && now <= self.end_date
    }
}
