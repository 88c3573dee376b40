use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use governance::{ProposalDraft, ProposalStatus, ProposalStore};
use parking_lot::Mutex;
use vote_storage::{FileStore, MemoryStore};

fn draft(voting_period: u32) -> ProposalDraft {
    ProposalDraft {
        title: "Fund the relay upgrade".to_string(),
        description: "Covers the audit and rollout".to_string(),
        proposal_type: "treasury".to_string(),
        category: "infrastructure".to_string(),
        voting_period,
        quorum_threshold: 50,
        execution_delay: 2,
        options: vec!["Approve".to_string(), "Reject".to_string()],
        rationale: "See forum thread".to_string(),
        implementation: "Phased rollout".to_string(),
    }
}

#[test]
fn test_voting_window_closes_after_period() {
    let store = ProposalStore::open(Arc::new(MemoryStore::new()));
    let created = Utc::now();
    let id = store.create_proposal_at(draft(7), created).unwrap();

    // Six days in: still open.
    assert!(store
        .vote_at(&id, "Approve", "alice", created + Duration::days(6))
        .unwrap());

    // Eight days in: closed, and the earlier vote still stands.
    assert!(!store
        .vote_at(&id, "Approve", "bob", created + Duration::days(8))
        .unwrap());

    let results = store.vote_results(&id);
    assert_eq!(results["Approve"], 1);
    assert_eq!(results["Reject"], 0);
}

#[test]
fn test_chain_status_sync_forces_local_status() {
    let store = ProposalStore::open(Arc::new(MemoryStore::new()));
    let id = store.create_proposal(draft(7)).unwrap();

    assert!(store.sync_with_chain_status(&id, "Executed").unwrap());
    let proposal = store.proposal(&id).unwrap();
    assert_eq!(proposal.status, ProposalStatus::Executed);
    assert_eq!(proposal.on_chain_status.as_deref(), Some("Executed"));

    // Unrecognized status: raw field updated, local status untouched.
    assert!(store.sync_with_chain_status(&id, "Zorp").unwrap());
    let proposal = store.proposal(&id).unwrap();
    assert_eq!(proposal.status, ProposalStatus::Executed);
    assert_eq!(proposal.on_chain_status.as_deref(), Some("Zorp"));

    assert!(!store.sync_with_chain_status("prop-unknown", "Ongoing").unwrap());
}

#[test]
fn test_snapshot_roundtrip_into_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStore::open(dir.path()).unwrap());

    let store = ProposalStore::open(storage.clone());
    let id = store.create_proposal(draft(7)).unwrap();
    store.vote(&id, "Approve", "alice").unwrap();
    store
        .sync_with_chain_status(&id, "Ongoing")
        .unwrap();

    let reopened = ProposalStore::open(storage);
    let original = store.proposals();
    let restored = reopened.proposals();

    assert_eq!(original.len(), restored.len());
    let (a, b) = (&original[0], &restored[0]);
    assert_eq!(a.id, b.id);
    assert_eq!(a.created_at, b.created_at);
    assert_eq!(a.end_date, b.end_date);
    assert_eq!(a.status, b.status);
    assert_eq!(a.votes, b.votes);
    assert_eq!(a.total_votes, b.total_votes);
    assert_eq!(a.on_chain_status, b.on_chain_status);

    assert_eq!(reopened.user_vote(&id, "alice"), Some("Approve".to_string()));
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("governance-proposals.json"), "{ not json").unwrap();

    let storage = Arc::new(FileStore::open(dir.path()).unwrap());
    let store = ProposalStore::open(storage);
    assert!(store.proposals().is_empty());

    // The store stays usable and overwrites the bad snapshot.
    let id = store.create_proposal(draft(7)).unwrap();
    assert!(store.proposal(&id).is_some());
}

#[test]
fn test_listener_fanout_and_unsubscribe() {
    let store = ProposalStore::open(Arc::new(MemoryStore::new()));
    let order = Arc::new(Mutex::new(Vec::new()));
    let first_count = Arc::new(AtomicUsize::new(0));
    let second_count = Arc::new(AtomicUsize::new(0));

    let (order_a, count_a) = (order.clone(), first_count.clone());
    let first = store.subscribe(move || {
        order_a.lock().push("first");
        count_a.fetch_add(1, Ordering::SeqCst);
    });
    let (order_b, count_b) = (order.clone(), second_count.clone());
    store.subscribe(move || {
        order_b.lock().push("second");
        count_b.fetch_add(1, Ordering::SeqCst);
    });

    let id = store.create_proposal(draft(7)).unwrap();
    store.vote(&id, "Approve", "alice").unwrap();

    // Two mutations, both listeners each time, in registration order.
    assert_eq!(first_count.load(Ordering::SeqCst), 2);
    assert_eq!(second_count.load(Ordering::SeqCst), 2);
    assert_eq!(
        *order.lock(),
        vec!["first", "second", "first", "second"]
    );

    assert!(store.unsubscribe(first));
    store.vote(&id, "Reject", "bob").unwrap();
    assert_eq!(first_count.load(Ordering::SeqCst), 2);
    assert_eq!(second_count.load(Ordering::SeqCst), 3);
}

#[test]
fn test_rejected_vote_does_not_notify() {
    let store = ProposalStore::open(Arc::new(MemoryStore::new()));
    let id = store.create_proposal(draft(7)).unwrap();

    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = notifications.clone();
    store.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.vote(&id, "Approve", "alice").unwrap();
    assert_eq!(notifications.load(Ordering::SeqCst), 1);

    // Duplicate voter: rejected, no fan-out.
    store.vote(&id, "Reject", "alice").unwrap();
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
}

#[test]
fn test_listener_can_reread_store_state() {
    let store = Arc::new(ProposalStore::open(Arc::new(MemoryStore::new())));

    let seen = Arc::new(Mutex::new(0usize));
    let (reader, totals) = (store.clone(), seen.clone());
    store.subscribe(move || {
        *totals.lock() = reader.proposals().len();
    });

    store.create_proposal(draft(7)).unwrap();
    store.create_proposal(draft(14)).unwrap();
    assert_eq!(*seen.lock(), 2);
}
