//! VotePlatform Activity Module
//!
//! Append-only, capacity-bounded journal of user actions (views, votes,
//! proposal creation) backing the activity feed and per-user stats.

pub mod store;
pub mod types;

pub use store::{UserActivityStore, ACTIVITIES_KEY, MAX_ACTIVITIES};
pub use types::{ActivityKind, NewActivity, UserActivity, UserStats};
