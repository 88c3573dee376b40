//! Activity record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of user action recorded in the journal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Vote,
    ProposalCreated,
    ProposalViewed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserActivity {
    pub id: String,
    pub user_id: String,
    pub kind: ActivityKind,
    pub proposal_id: String,
    /// Title snapshot taken when the activity was recorded; the proposal
    /// may be renamed or gone by the time the feed renders.
    pub proposal_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Caller-supplied fields; the store stamps the id and timestamp.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: String,
    pub kind: ActivityKind,
    pub proposal_id: String,
    pub proposal_title: String,
    pub details: Option<String>,
}

/// Per-user aggregate over the journal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    pub total_votes: usize,
    pub total_proposals_created: usize,
    pub total_proposals_viewed: usize,
    /// That user's 10 newest entries, newest first.
    pub recent_activity: Vec<UserActivity>,
}
