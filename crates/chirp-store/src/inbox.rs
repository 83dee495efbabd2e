//! Per-user view of the feed.
//!
//! An inbox holds keys only; the tweets themselves live in the controller's
//! [`TweetRegistry`]. Each timeline entry remembers its author so that an
//! unfollow can purge it without consulting the registry.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use chirp_shared::{ChirpError, Lookup, Result, TweetId, Username};

use crate::tweet::{Tweet, TweetRegistry};

#[derive(Debug, Clone, Default)]
pub struct Inbox {
    /// Tweets visible in the owner's timeline, keyed by id.
    timeline: BTreeMap<TweetId, Username>,
    /// Tweets the owner authored.
    my_tweets: BTreeSet<TweetId>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) a timeline entry.
    pub fn store_in_timeline(&mut self, tweet: &Tweet) {
        self.timeline.insert(tweet.id(), tweet.author().to_string());
    }

    /// Insert (or overwrite) an authored entry.
    pub fn store_in_my_tweets(&mut self, tweet: &Tweet) {
        self.my_tweets.insert(tweet.id());
    }

    /// Timeline tweets, most recent first, skipping deleted ones.
    pub fn timeline<'a>(&self, registry: &'a TweetRegistry) -> Vec<&'a Tweet> {
        self.timeline
            .keys()
            .rev()
            .filter_map(|id| registry.get(id))
            .filter(|tweet| !tweet.is_deleted())
            .collect()
    }

    /// Confirm `id` is in the timeline and hand it back.
    pub fn get_tweet(&self, id: TweetId) -> Result<TweetId> {
        if self.timeline.contains_key(&id) {
            Ok(id)
        } else {
            Err(ChirpError::TweetNotFound {
                id,
                lookup: Lookup::Exists,
            })
        }
    }

    /// Drop every timeline entry written by `username`.
    pub fn remove_messages_from(&mut self, username: &str) {
        let before = self.timeline.len();
        self.timeline.retain(|_, author| author.as_str() != username);
        trace!(
            author = %username,
            removed = before - self.timeline.len(),
            "Purged timeline entries"
        );
    }

    /// Authored tweets, most recent first.
    pub fn my_tweets<'a>(&self, registry: &'a TweetRegistry) -> Vec<&'a Tweet> {
        self.my_tweets
            .iter()
            .rev()
            .filter_map(|id| registry.get(id))
            .collect()
    }

    /// Number of timeline entries, deleted ones included.
    pub fn timeline_len(&self) -> usize {
        self.timeline.len()
    }
}
