//! Bounded activity journal
//!
//! Entries are kept newest-first and the journal holds at most
//! [`MAX_ACTIVITIES`] of them; the oldest are evicted on overflow.
//! Entries are never individually deleted or mutated. Like the proposal
//! store, every mutation rewrites the full snapshot and notifies every
//! subscriber.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::warn;

use vote_core::{generate_id, Subscribers, SubscriptionId};
use vote_storage::{load_snapshot, save_snapshot, SnapshotStore, StorageError};

use crate::types::{ActivityKind, NewActivity, UserActivity, UserStats};

/// Snapshot key for the activity journal.
pub const ACTIVITIES_KEY: &str = "user-activities";

/// Retention cap; the oldest entries are evicted past this.
pub const MAX_ACTIVITIES: usize = 100;

/// Entries returned in [`UserStats::recent_activity`].
const RECENT_PER_USER: usize = 10;

pub struct UserActivityStore {
    activities: RwLock<Vec<UserActivity>>,
    subscribers: Subscribers,
    storage: Arc<dyn SnapshotStore>,
}

impl UserActivityStore {
    /// Open the journal, loading any previous snapshot. A missing or
    /// corrupt snapshot starts the journal empty.
    pub fn open(storage: Arc<dyn SnapshotStore>) -> Self {
        let activities = match load_snapshot::<Vec<UserActivity>>(storage.as_ref(), ACTIVITIES_KEY)
        {
            Ok(Some(list)) => list,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("discarding unreadable activity snapshot: {}", e);
                Vec::new()
            }
        };

        Self {
            activities: RwLock::new(activities),
            subscribers: Subscribers::new(),
            storage,
        }
    }

    /// Record an activity and return its generated id.
    pub fn add_activity(&self, activity: NewActivity) -> Result<String, StorageError> {
        self.add_activity_at(activity, Utc::now())
    }

    /// Deterministic-clock variant of [`add_activity`].
    pub fn add_activity_at(
        &self,
        activity: NewActivity,
        now: DateTime<Utc>,
    ) -> Result<String, StorageError> {
        let id = generate_id("activity");
        {
            let mut activities = self.activities.write();
            activities.insert(
                0,
                UserActivity {
                    id: id.clone(),
                    user_id: activity.user_id,
                    kind: activity.kind,
                    proposal_id: activity.proposal_id,
                    proposal_title: activity.proposal_title,
                    details: activity.details,
                    timestamp: now,
                },
            );
            activities.truncate(MAX_ACTIVITIES);
            save_snapshot(self.storage.as_ref(), ACTIVITIES_KEY, &*activities)?;
        }
        self.subscribers.notify();
        Ok(id)
    }

    /// Per-user counts by kind plus that user's newest entries.
    pub fn user_stats(&self, user_id: &str) -> UserStats {
        let activities = self.activities.read();
        let mut stats = UserStats::default();

        for activity in activities.iter().filter(|a| a.user_id == user_id) {
            match activity.kind {
                ActivityKind::Vote => stats.total_votes += 1,
                ActivityKind::ProposalCreated => stats.total_proposals_created += 1,
                ActivityKind::ProposalViewed => stats.total_proposals_viewed += 1,
            }
            if stats.recent_activity.len() < RECENT_PER_USER {
                stats.recent_activity.push(activity.clone());
            }
        }

        stats
    }

    pub fn all_activities(&self) -> Vec<UserActivity> {
        self.activities.read().clone()
    }

    /// Newest `limit` entries.
    pub fn recent_activities(&self, limit: usize) -> Vec<UserActivity> {
        self.activities.read().iter().take(limit).cloned().collect()
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vote_storage::{FileStore, MemoryStore};

    fn activity(user_id: &str, kind: ActivityKind, title: &str) -> NewActivity {
        NewActivity {
            user_id: user_id.to_string(),
            kind,
            proposal_id: "prop-1".to_string(),
            proposal_title: title.to_string(),
            details: None,
        }
    }

    fn open_store() -> UserActivityStore {
        UserActivityStore::open(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_newest_first_ordering() {
        let store = open_store();
        store
            .add_activity(activity("alice", ActivityKind::ProposalViewed, "older"))
            .unwrap();
        store
            .add_activity(activity("alice", ActivityKind::Vote, "newer"))
            .unwrap();

        let recent = store.recent_activities(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].proposal_title, "newer");
        assert_eq!(recent[1].proposal_title, "older");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let store = open_store();
        for i in 0..101 {
            store
                .add_activity(activity(
                    "alice",
                    ActivityKind::ProposalViewed,
                    &format!("proposal {}", i),
                ))
                .unwrap();
        }

        let all = store.all_activities();
        assert_eq!(all.len(), MAX_ACTIVITIES);
        // Entry 0 (the oldest) was evicted; 100 is the newest.
        assert_eq!(all[0].proposal_title, "proposal 100");
        assert_eq!(all[99].proposal_title, "proposal 1");
    }

    #[test]
    fn test_user_stats_counts_and_recent() {
        let store = open_store();
        for i in 0..12 {
            store
                .add_activity(activity(
                    "alice",
                    ActivityKind::Vote,
                    &format!("voted {}", i),
                ))
                .unwrap();
        }
        store
            .add_activity(activity("alice", ActivityKind::ProposalCreated, "created"))
            .unwrap();
        store
            .add_activity(activity("bob", ActivityKind::ProposalViewed, "viewed"))
            .unwrap();

        let stats = store.user_stats("alice");
        assert_eq!(stats.total_votes, 12);
        assert_eq!(stats.total_proposals_created, 1);
        assert_eq!(stats.total_proposals_viewed, 0);
        assert_eq!(stats.recent_activity.len(), 10);
        assert_eq!(stats.recent_activity[0].proposal_title, "created");

        let none = store.user_stats("nobody");
        assert_eq!(none.total_votes, 0);
        assert!(none.recent_activity.is_empty());
    }

    #[test]
    fn test_recent_activities_limit() {
        let store = open_store();
        for i in 0..5 {
            store
                .add_activity(activity(
                    "alice",
                    ActivityKind::ProposalViewed,
                    &format!("proposal {}", i),
                ))
                .unwrap();
        }

        assert_eq!(store.recent_activities(3).len(), 3);
        assert_eq!(store.recent_activities(20).len(), 5);
    }

    #[test]
    fn test_snapshot_roundtrip_into_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileStore::open(dir.path()).unwrap());

        let store = UserActivityStore::open(storage.clone());
        store
            .add_activity(activity("alice", ActivityKind::Vote, "voted"))
            .unwrap();
        store
            .add_activity(activity("alice", ActivityKind::ProposalCreated, "created"))
            .unwrap();

        let reopened = UserActivityStore::open(storage);
        assert_eq!(reopened.all_activities(), store.all_activities());
    }

    #[test]
    fn test_listener_fanout() {
        let store = open_store();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = count.clone();
        let id = store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store
            .add_activity(activity("alice", ActivityKind::Vote, "voted"))
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(store.unsubscribe(id));
        store
            .add_activity(activity("alice", ActivityKind::Vote, "voted again"))
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
