//! Proposal store
//!
//! Single source of truth for proposals and votes on one device. Every
//! mutation rewrites the full snapshot to the storage substrate and then
//! fans out a no-payload notification; readers always pull fresh state.
//!
//! Validation failures (unknown proposal, inactive or expired proposal,
//! duplicate voter, undeclared option) are signaled with `Ok(false)`,
//! never an error. `Err` is reserved for the storage substrate.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use vote_core::{generate_id, Subscribers, SubscriptionId};
use vote_storage::{load_snapshot, save_snapshot, SnapshotStore};

use crate::config::{MAX_OPTIONS, MIN_OPTIONS};
use crate::error::{GovernanceError, Result};
use crate::proposal::{Proposal, ProposalDraft, ProposalStatus, ReferendumUpdate};
use crate::voting::{Vote, VoteRecord};

/// Snapshot key for the proposal catalog.
pub const PROPOSALS_KEY: &str = "governance-proposals";

/// Durable snapshot layout: the catalog plus the flat vote log.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogSnapshot {
    proposals: Vec<Proposal>,
    votes: Vec<Vote>,
}

pub struct ProposalStore {
    state: RwLock<CatalogSnapshot>,
    subscribers: Subscribers,
    storage: Arc<dyn SnapshotStore>,
}

impl ProposalStore {
    /// Open the store, loading any previous snapshot. A missing or
    /// corrupt snapshot starts the store empty rather than failing the
    /// caller.
    pub fn open(storage: Arc<dyn SnapshotStore>) -> Self {
        let state = match load_snapshot::<CatalogSnapshot>(storage.as_ref(), PROPOSALS_KEY) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => CatalogSnapshot::default(),
            Err(e) => {
                warn!("discarding unreadable proposal snapshot: {}", e);
                CatalogSnapshot::default()
            }
        };

        Self {
            state: RwLock::new(state),
            subscribers: Subscribers::new(),
            storage,
        }
    }

    /// Create a proposal and return its generated id.
    pub fn create_proposal(&self, draft: ProposalDraft) -> Result<String> {
        self.create_proposal_at(draft, Utc::now())
    }

    /// Deterministic-clock variant of [`create_proposal`].
    pub fn create_proposal_at(&self, draft: ProposalDraft, now: DateTime<Utc>) -> Result<String> {
        let count = draft.options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
            return Err(GovernanceError::InvalidOptionCount {
                min: MIN_OPTIONS,
                max: MAX_OPTIONS,
                got: count,
            });
        }

        let id = generate_id("prop");
        {
            let mut state = self.state.write();
            state
                .proposals
                .push(Proposal::from_draft(id.clone(), draft, now));
            self.persist(&state)?;
        }
        self.subscribers.notify();
        Ok(id)
    }

    /// All proposals, newest first.
    pub fn proposals(&self) -> Vec<Proposal> {
        let state = self.state.read();
        let mut proposals = state.proposals.clone();
        proposals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        proposals
    }

    pub fn proposal(&self, id: &str) -> Option<Proposal> {
        self.state
            .read()
            .proposals
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Record a vote. `Ok(false)` when the proposal is unknown, not
    /// active, past its end date, the voter has already voted, or the
    /// option is not one of the proposal's declared options.
    pub fn vote(&self, proposal_id: &str, option: &str, voter: &str) -> Result<bool> {
        self.vote_at(proposal_id, option, voter, Utc::now())
    }

    /// Deterministic-clock variant of [`vote`].
    pub fn vote_at(
        &self,
        proposal_id: &str,
        option: &str,
        voter: &str,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        {
            let mut state = self.state.write();
            let idx = match state.proposals.iter().position(|p| p.id == proposal_id) {
                Some(idx) => idx,
                None => return Ok(false),
            };

            let accepted = {
                let proposal = &mut state.proposals[idx];
                if !proposal.accepts_votes_at(now)
                    || proposal.votes.contains_key(voter)
                    || !proposal.options.iter().any(|o| o == option)
                {
                    false
                } else {
                    proposal.votes.insert(
                        voter.to_string(),
                        VoteRecord {
                            option: option.to_string(),
                            timestamp: now,
                            voter: voter.to_string(),
                        },
                    );
                    proposal.total_votes += 1;
                    true
                }
            };
            if !accepted {
                return Ok(false);
            }

            state.votes.push(Vote {
                proposal_id: proposal_id.to_string(),
                option: option.to_string(),
                voter: voter.to_string(),
                timestamp: now,
            });
            self.persist(&state)?;
        }
        self.subscribers.notify();
        Ok(true)
    }

    /// Tally per declared option, zero-filled for options with no votes.
    /// Empty for an unknown proposal.
    pub fn vote_results(&self, proposal_id: &str) -> HashMap<String, usize> {
        let state = self.state.read();
        let proposal = match state.proposals.iter().find(|p| p.id == proposal_id) {
            Some(proposal) => proposal,
            None => return HashMap::new(),
        };

        let mut results: HashMap<String, usize> = proposal
            .options
            .iter()
            .map(|option| (option.clone(), 0))
            .collect();
        for record in proposal.votes.values() {
            *results.entry(record.option.clone()).or_insert(0) += 1;
        }
        results
    }

    pub fn has_voted(&self, proposal_id: &str, voter: &str) -> bool {
        self.state
            .read()
            .proposals
            .iter()
            .find(|p| p.id == proposal_id)
            .map(|p| p.votes.contains_key(voter))
            .unwrap_or(false)
    }

    pub fn user_vote(&self, proposal_id: &str, voter: &str) -> Option<String> {
        self.state
            .read()
            .proposals
            .iter()
            .find(|p| p.id == proposal_id)?
            .votes
            .get(voter)
            .map(|record| record.option.clone())
    }

    /// Attach chain linkage to an existing proposal. `Ok(false)` for an
    /// unknown proposal.
    pub fn update_with_referendum(
        &self,
        proposal_id: &str,
        update: ReferendumUpdate,
    ) -> Result<bool> {
        {
            let mut state = self.state.write();
            let proposal = match state.proposals.iter_mut().find(|p| p.id == proposal_id) {
                Some(proposal) => proposal,
                None => return Ok(false),
            };

            proposal.referendum_id = Some(update.referendum_id);
            proposal.track_id = update.track_id;
            proposal.on_chain_status = update.on_chain_status;
            proposal.beneficiary_address = update.beneficiary_address;
            proposal.amount = update.amount;
            proposal.call_data = update.call_data;

            self.persist(&state)?;
        }
        self.subscribers.notify();
        Ok(true)
    }

    /// Linear-scan lookup by referendum id.
    pub fn proposal_by_referendum(&self, referendum_id: u32) -> Option<Proposal> {
        self.state
            .read()
            .proposals
            .iter()
            .find(|p| p.referendum_id == Some(referendum_id))
            .cloned()
    }

    /// Record the raw on-chain status and derive the local lifecycle
    /// status from it. An unrecognized status string still overwrites
    /// `on_chain_status` but leaves the local status untouched.
    pub fn sync_with_chain_status(&self, proposal_id: &str, on_chain_status: &str) -> Result<bool> {
        {
            let mut state = self.state.write();
            let proposal = match state.proposals.iter_mut().find(|p| p.id == proposal_id) {
                Some(proposal) => proposal,
                None => return Ok(false),
            };

            proposal.on_chain_status = Some(on_chain_status.to_string());
            if let Some(status) = ProposalStatus::from_chain_status(on_chain_status) {
                proposal.status = status;
            }

            self.persist(&state)?;
        }
        self.subscribers.notify();
        Ok(true)
    }

    /// Register a listener invoked after every mutation.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn persist(&self, state: &CatalogSnapshot) -> Result<()> {
        save_snapshot(self.storage.as_ref(), PROPOSALS_KEY, state)?;
        Ok(())
    }
}
