//! HTTP client for the chain node's referenda API
//!
//! One pinned surface, no runtime probing of module names:
//! `GET /health`, `GET /referenda`, `GET /referenda/{id}`,
//! `POST /referenda`. All requests carry the configured timeout.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ChainConfig;
use crate::error::{ChainError, Result};

/// Referendum state as reported by the node. The status vocabulary is
/// open-ended (`Ongoing`, `Approved`, `Rejected`, `Executed`,
/// `Cancelled`, ...); unrecognized values are passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferendumInfo {
    pub id: u32,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
}

impl ReferendumInfo {
    pub fn is_ongoing(&self) -> bool {
        self.status == "Ongoing"
    }
}

/// Treasury spend submission: pays `amount` to `beneficiary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendSubmission {
    pub beneficiary: String,
    pub amount: u128,
    /// Hex-encoded extrinsic, signed by the caller's wallet.
    pub signed_extrinsic: String,
}

/// Remark submission: a general-track text referendum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemarkSubmission {
    pub remark: String,
    pub signed_extrinsic: String,
}

/// Node acknowledgment for a submitted referendum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferendumSubmission {
    pub index: u32,
    pub track: String,
    pub hash: String,
}

pub struct ChainClient {
    http: reqwest::Client,
    base_url: String,
    connected: AtomicBool,
}

impl ChainClient {
    /// Build a client for the config's default network.
    pub fn new(config: &ChainConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.endpoint().trim_end_matches('/').to_string(),
            connected: AtomicBool::new(false),
        })
    }

    /// Probe the node and mark the client connected.
    pub async fn connect(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(node_error(response).await);
        }
        self.connected.store(true, Ordering::SeqCst);
        info!("connected to chain node at {}", self.base_url);
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// All referenda known to the node.
    pub async fn referenda(&self) -> Result<Vec<ReferendumInfo>> {
        self.ensure_connected()?;
        let url = format!("{}/referenda", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(node_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Referenda still in their voting phase.
    pub async fn ongoing_referenda(&self) -> Result<Vec<ReferendumInfo>> {
        Ok(self
            .referenda()
            .await?
            .into_iter()
            .filter(|referendum| referendum.is_ongoing())
            .collect())
    }

    /// A single referendum, `None` if the node has never seen the id.
    pub async fn referendum(&self, id: u32) -> Result<Option<ReferendumInfo>> {
        self.ensure_connected()?;
        let url = format!("{}/referenda/{}", self.base_url, id);
        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(node_error(response).await);
        }
        Ok(Some(response.json().await?))
    }

    /// Submit a treasury spend referendum.
    pub async fn submit_spend(&self, submission: &SpendSubmission) -> Result<ReferendumSubmission> {
        self.submit(submission).await
    }

    /// Submit a remark referendum.
    pub async fn submit_remark(
        &self,
        submission: &RemarkSubmission,
    ) -> Result<ReferendumSubmission> {
        self.submit(submission).await
    }

    async fn submit<T: Serialize + ?Sized>(&self, body: &T) -> Result<ReferendumSubmission> {
        self.ensure_connected()?;
        let url = format!("{}/referenda", self.base_url);
        let response = self.http.post(&url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(node_error(response).await);
        }
        let submission: ReferendumSubmission = response.json().await?;
        debug!(
            "referendum {} submitted on track {}",
            submission.index, submission.track
        );
        Ok(submission)
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(ChainError::NotConnected)
        }
    }
}

async fn node_error(response: reqwest::Response) -> ChainError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    ChainError::Node { status, message }
}
