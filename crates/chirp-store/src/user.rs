use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use chirp_shared::constants::{FOLLOWERS_LABEL, FOLLOWING_LABEL, LIST_SEPARATOR};
use chirp_shared::{ChirpError, Result, TweetId, Username};

use crate::inbox::Inbox;
use crate::tweet::Tweet;

/// Every user in the system, keyed by name. Owned by the controller.
pub type UserRegistry = BTreeMap<Username, User>;

/// A registered user: identity, inbox, and both sides of the follow graph.
///
/// Follow edges are stored by name on both ends. `a.following` holds `b`
/// exactly when `b.followers` holds `a`; the methods that take two users keep
/// the sides in step.
#[derive(Debug, Clone)]
pub struct User {
    name: Username,
    inbox: Inbox,
    followers: BTreeSet<Username>,
    following: BTreeSet<Username>,
}

impl User {
    pub fn new(name: impl Into<Username>) -> Self {
        Self {
            name: name.into(),
            inbox: Inbox::new(),
            followers: BTreeSet::new(),
            following: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    /// Names this user follows, in lexicographic order.
    pub fn following(&self) -> impl Iterator<Item = &Username> {
        self.following.iter()
    }

    /// Names following this user, in lexicographic order.
    pub fn followers(&self) -> impl Iterator<Item = &Username> {
        self.followers.iter()
    }

    pub fn is_following(&self, username: &str) -> bool {
        self.following.contains(username)
    }

    pub fn is_followed_by(&self, username: &str) -> bool {
        self.followers.contains(username)
    }

    /// Check whether following `username` would be accepted.
    pub fn check_follow(&self, username: &str) -> Result<()> {
        if username == self.name {
            return Err(ChirpError::SelfFollow(self.name.clone()));
        }
        if self.is_following(username) {
            return Err(ChirpError::AlreadyFollowing {
                follower: self.name.clone(),
                followee: username.to_string(),
            });
        }
        Ok(())
    }

    /// Check whether unfollowing `username` would be accepted.
    pub fn check_unfollow(&self, username: &str) -> Result<()> {
        if !self.is_following(username) {
            return Err(ChirpError::NotFollowing {
                follower: self.name.clone(),
                followee: username.to_string(),
            });
        }
        Ok(())
    }

    /// Follow `other`, recording the edge on both sides.
    pub fn follow(&mut self, other: &mut User) -> Result<()> {
        self.check_follow(&other.name)?;
        self.following.insert(other.name.clone());
        other.followers.insert(self.name.clone());
        debug!(follower = %self.name, followee = %other.name, "Follow edge added");
        Ok(())
    }

    /// Stop following `other`: purge its tweets from this timeline and drop
    /// the edge on both sides.
    pub fn unfollow(&mut self, other: &mut User) -> Result<()> {
        self.check_unfollow(&other.name)?;
        self.inbox.remove_messages_from(&other.name);
        self.following.remove(&other.name);
        other.followers.remove(&self.name);
        debug!(follower = %self.name, followee = %other.name, "Follow edge removed");
        Ok(())
    }

    /// Publish `tweet`: keep it in this user's timeline and authored list,
    /// then copy it into each inbox of `audience`.
    ///
    /// `audience` must be the current followers; whoever follows later never
    /// receives the tweet.
    pub fn send_tweet<'a>(
        &mut self,
        tweet: &Tweet,
        audience: impl IntoIterator<Item = &'a mut User>,
    ) {
        self.inbox.store_in_timeline(tweet);
        self.inbox.store_in_my_tweets(tweet);

        let mut delivered = 0usize;
        for follower in audience {
            debug_assert!(self.is_followed_by(&follower.name));
            follower.inbox.store_in_timeline(tweet);
            delivered += 1;
        }
        debug!(author = %self.name, tweet = %tweet.id(), delivered, "Tweet fanned out");
    }

    /// Resolve a tweet this user may like. It has to be in their timeline.
    pub fn likeable(&self, id: TweetId) -> Result<TweetId> {
        self.inbox.get_tweet(id)
    }

    /// Drop every outgoing edge, and the matching follower entry on each
    /// followed user still in `users`.
    pub fn unfollow_all(&mut self, users: &mut UserRegistry) {
        for name in std::mem::take(&mut self.following) {
            if let Some(other) = users.get_mut(&name) {
                other.followers.remove(&self.name);
            }
        }
    }

    /// Drop every incoming edge, and the matching following entry on each
    /// follower still in `users`.
    pub fn reject_all(&mut self, users: &mut UserRegistry) {
        for name in std::mem::take(&mut self.followers) {
            if let Some(other) = users.get_mut(&name) {
                other.following.remove(&self.name);
            }
        }
    }

    /// Name on the first line, then the followed and follower lists.
    pub fn render(&self) -> String {
        format!(
            "{}\n{}[{}]\n{}[{}]",
            self.name,
            FOLLOWING_LABEL,
            join(&self.following),
            FOLLOWERS_LABEL,
            join(&self.followers),
        )
    }
}

fn join(names: &BTreeSet<Username>) -> String {
    names
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}
