//! # chirp-store
//!
//! In-memory model of the feed: tweets, per-user inboxes, the follow graph,
//! and the [`Controller`] that owns all of it.
//!
//! The controller is an arena. Users and tweets live in its two registries;
//! inboxes, follow sets, and retweet links only hold keys into them, so
//! removing a user never leaves a dangling reference behind.

pub mod controller;
pub mod inbox;
pub mod tweet;
pub mod user;

pub use controller::Controller;
pub use inbox::Inbox;
pub use tweet::{Tweet, TweetRegistry};
pub use user::User;
