//! VotePlatform Core Plumbing
//!
//! Shared by the governance and activity stores: opaque identifier
//! generation and the subscriber registry both stores fan out through
//! after every mutation.

pub mod id;
pub mod subscription;

pub use id::generate_id;
pub use subscription::{Subscribers, SubscriptionId};
