//! Chain status sync
//!
//! One-directional bridge from the node into the proposal store: submits
//! local proposals as referenda and pushes status strings back through
//! `sync_with_chain_status`. The store is only touched after a settled,
//! successful node call, so an unsettled or failed call cannot corrupt
//! local state.

use std::sync::Arc;
use tracing::{debug, warn};

use governance::{ProposalStore, ReferendumUpdate};

use crate::client::{ChainClient, ReferendumSubmission, RemarkSubmission, SpendSubmission};
use crate::error::{ChainError, Result};

/// Referendum payload for a local proposal.
#[derive(Debug, Clone)]
pub enum ProposalSubmission {
    /// Treasury-track spend.
    Spend(SpendSubmission),
    /// General-track remark.
    Remark(RemarkSubmission),
}

pub struct ChainSyncAdapter {
    client: ChainClient,
    store: Arc<ProposalStore>,
}

impl ChainSyncAdapter {
    pub fn new(client: ChainClient, store: Arc<ProposalStore>) -> Self {
        Self { client, store }
    }

    pub fn client(&self) -> &ChainClient {
        &self.client
    }

    /// Submit a local proposal as a referendum and record the linkage.
    ///
    /// The proposal must already exist locally; a chain-submitted
    /// proposal is therefore always tracked in the store.
    pub async fn submit_proposal(
        &self,
        proposal_id: &str,
        submission: ProposalSubmission,
    ) -> Result<ReferendumSubmission> {
        if self.store.proposal(proposal_id).is_none() {
            return Err(ChainError::UnknownProposal(proposal_id.to_string()));
        }

        let (ack, update) = match submission {
            ProposalSubmission::Spend(spend) => {
                let ack = self.client.submit_spend(&spend).await?;
                let update = ReferendumUpdate {
                    referendum_id: ack.index,
                    track_id: None,
                    on_chain_status: Some("Ongoing".to_string()),
                    beneficiary_address: Some(spend.beneficiary),
                    amount: Some(spend.amount),
                    call_data: Some(spend.signed_extrinsic),
                };
                (ack, update)
            }
            ProposalSubmission::Remark(remark) => {
                let ack = self.client.submit_remark(&remark).await?;
                let update = ReferendumUpdate {
                    referendum_id: ack.index,
                    track_id: None,
                    on_chain_status: Some("Ongoing".to_string()),
                    beneficiary_address: None,
                    amount: None,
                    call_data: Some(remark.signed_extrinsic),
                };
                (ack, update)
            }
        };

        self.store.update_with_referendum(proposal_id, update)?;
        Ok(ack)
    }

    /// Refresh one proposal's status from the node. `Ok(false)` when the
    /// proposal is unknown, has no referendum linkage, or the node has no
    /// record of the referendum.
    pub async fn sync_proposal(&self, proposal_id: &str) -> Result<bool> {
        let referendum_id = match self.store.proposal(proposal_id) {
            Some(proposal) => match proposal.referendum_id {
                Some(id) => id,
                None => return Ok(false),
            },
            None => return Ok(false),
        };

        let info = match self.client.referendum(referendum_id).await? {
            Some(info) => info,
            None => {
                debug!("referendum {} not found on node", referendum_id);
                return Ok(false);
            }
        };

        self.store
            .sync_with_chain_status(proposal_id, &info.status)?;
        Ok(true)
    }

    /// Refresh every locally tracked proposal that has a referendum id.
    /// Node failures are logged and skipped so one bad fetch cannot stall
    /// the sweep. Returns the number of proposals updated.
    pub async fn sync_all(&self) -> usize {
        let mut synced = 0;
        for proposal in self.store.proposals() {
            if proposal.referendum_id.is_none() {
                continue;
            }
            match self.sync_proposal(&proposal.id).await {
                Ok(true) => synced += 1,
                Ok(false) => {}
                Err(e) => warn!("status sync failed for {}: {}", proposal.id, e),
            }
        }
        synced
    }
}
