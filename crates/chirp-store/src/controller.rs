//! Process-wide registry of users and tweets.
//!
//! The [`Controller`] is the single entry point for every command. It owns
//! every [`User`] and every [`Tweet`]; everything else refers to them by key.

use tracing::debug;

use chirp_shared::{ChirpError, Lookup, Result, TweetId};

use crate::tweet::{Tweet, TweetRegistry};
use crate::user::{User, UserRegistry};

#[derive(Debug, Default)]
pub struct Controller {
    next_tweet_id: TweetId,
    users: UserRegistry,
    tweets: TweetRegistry,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub fn add_user(&mut self, username: &str) -> Result<()> {
        if self.users.contains_key(username) {
            return Err(ChirpError::DuplicateUser(username.to_string()));
        }
        self.users.insert(username.to_string(), User::new(username));
        debug!(user = %username, "User added");
        Ok(())
    }

    pub fn get_user(&self, username: &str) -> Result<&User> {
        self.users.get(username).ok_or_else(|| ChirpError::UserNotFound {
            username: username.to_string(),
            lookup: Lookup::Find,
        })
    }

    /// Remove a user after severing every follow edge that touches it.
    ///
    /// Tweets the user wrote stay in the registry and in any timeline that
    /// already received them.
    pub fn remove_user(&mut self, username: &str) -> Result<()> {
        let mut user = self
            .users
            .remove(username)
            .ok_or_else(|| ChirpError::UserNotFound {
                username: username.to_string(),
                lookup: Lookup::Exists,
            })?;
        user.unfollow_all(&mut self.users);
        user.reject_all(&mut self.users);
        debug!(user = %username, "User removed");
        Ok(())
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Registered names, in lexicographic order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    // -----------------------------------------------------------------------
    // Follow graph
    // -----------------------------------------------------------------------

    /// `follower` starts following `followee`.
    pub fn follow(&mut self, follower: &str, followee: &str) -> Result<()> {
        let source = self.get_user(follower)?;
        self.get_user(followee)?;
        source.check_follow(followee)?;

        let (source, mut others) = self.split_user(follower)?;
        let target = others
            .iter_mut()
            .find(|user| user.name() == followee)
            .ok_or_else(|| ChirpError::UserNotFound {
                username: followee.to_string(),
                lookup: Lookup::Find,
            })?;
        source.follow(target)
    }

    /// `follower` stops following `followee`.
    ///
    /// Only `follower` has to be registered; an edge to an unknown name
    /// cannot exist, so that case reports [`ChirpError::NotFollowing`].
    pub fn unfollow(&mut self, follower: &str, followee: &str) -> Result<()> {
        self.get_user(follower)?.check_unfollow(followee)?;

        let (source, mut others) = self.split_user(follower)?;
        let target = others
            .iter_mut()
            .find(|user| user.name() == followee)
            .ok_or_else(|| ChirpError::NotFollowing {
                follower: follower.to_string(),
                followee: followee.to_string(),
            })?;
        source.unfollow(target)
    }

    /// Borrow `username` mutably alongside every other user.
    fn split_user(&mut self, username: &str) -> Result<(&mut User, Vec<&mut User>)> {
        let mut found = None;
        let mut others = Vec::with_capacity(self.users.len().saturating_sub(1));
        for (name, user) in self.users.iter_mut() {
            if name == username {
                found = Some(user);
            } else {
                others.push(user);
            }
        }
        let user = found.ok_or_else(|| ChirpError::UserNotFound {
            username: username.to_string(),
            lookup: Lookup::Find,
        })?;
        Ok((user, others))
    }

    // -----------------------------------------------------------------------
    // Tweets
    // -----------------------------------------------------------------------

    fn allocate_tweet_id(&mut self) -> TweetId {
        let id = self.next_tweet_id;
        self.next_tweet_id = id.next();
        id
    }

    /// Post a new tweet from `username` and fan it out to current followers.
    pub fn send_tweet(&mut self, username: &str, message: &str) -> Result<TweetId> {
        self.get_user(username)?;
        let id = self.allocate_tweet_id();
        self.publish(Tweet::new(id, username, message))?;
        Ok(id)
    }

    /// Post a retweet of `original` from `username`.
    pub fn send_retweet(
        &mut self,
        username: &str,
        original: TweetId,
        message: &str,
    ) -> Result<TweetId> {
        if !self.tweets.contains_key(&original) {
            return Err(ChirpError::TweetNotFound {
                id: original,
                lookup: Lookup::Find,
            });
        }
        self.get_user(username)?;
        let id = self.allocate_tweet_id();
        self.publish(Tweet::retweet(id, username, message, original))?;
        Ok(id)
    }

    fn publish(&mut self, tweet: Tweet) -> Result<()> {
        let id = tweet.id();
        let (author, others) = self.split_user(tweet.author())?;
        let audience = others
            .into_iter()
            .filter(|user| author.is_followed_by(user.name()))
            .collect::<Vec<_>>();
        author.send_tweet(&tweet, audience);
        debug!(
            tweet = %id,
            author = %tweet.author(),
            retweet_of = ?tweet.retweet_of(),
            "Tweet registered"
        );
        self.tweets.insert(id, tweet);
        Ok(())
    }

    /// `username` likes tweet `id`, which must be in their timeline.
    pub fn like(&mut self, username: &str, id: TweetId) -> Result<()> {
        let id = self.get_user(username)?.likeable(id)?;
        let tweet = self.tweets.get_mut(&id).ok_or(ChirpError::TweetNotFound {
            id,
            lookup: Lookup::Exists,
        })?;
        tweet.like(username)?;
        debug!(user = %username, tweet = %id, "Tweet liked");
        Ok(())
    }

    /// Flag a tweet as deleted. It disappears from rendered timelines but
    /// keeps its id and its registry entry.
    pub fn delete_tweet(&mut self, id: TweetId) -> Result<()> {
        let tweet = self.tweets.get_mut(&id).ok_or(ChirpError::TweetNotFound {
            id,
            lookup: Lookup::Find,
        })?;
        tweet.mark_deleted();
        debug!(tweet = %id, "Tweet marked deleted");
        Ok(())
    }

    pub fn tweet(&self, id: TweetId) -> Option<&Tweet> {
        self.tweets.get(&id)
    }

    pub fn tweet_count(&self) -> usize {
        self.tweets.len()
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Rendered timeline lines for `username`, most recent first.
    pub fn timeline(&self, username: &str) -> Result<Vec<String>> {
        let user = self.get_user(username)?;
        Ok(user
            .inbox()
            .timeline(&self.tweets)
            .into_iter()
            .map(|tweet| tweet.render(&self.tweets))
            .collect())
    }

    /// Rendered tweets authored by `username`, most recent first.
    pub fn my_tweets(&self, username: &str) -> Result<Vec<String>> {
        let user = self.get_user(username)?;
        Ok(user
            .inbox()
            .my_tweets(&self.tweets)
            .into_iter()
            .map(|tweet| tweet.render(&self.tweets))
            .collect())
    }

    /// Every user's rendering, by username.
    pub fn render(&self) -> String {
        self.users
            .values()
            .map(User::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_users(names: &[&str]) -> Controller {
        let mut ctrl = Controller::new();
        for name in names {
            ctrl.add_user(name).unwrap();
        }
        ctrl
    }

    #[test]
    fn test_add_duplicate_user() {
        let mut ctrl = with_users(&["ana"]);
        let err = ctrl.add_user("ana").unwrap_err();
        assert!(matches!(err, ChirpError::DuplicateUser(_)));
        assert_eq!(ctrl.user_count(), 1);
    }

    #[test]
    fn test_usernames_are_distinct_and_sorted() {
        let mut ctrl = with_users(&["zoe", "ana", "bia"]);
        assert!(ctrl.add_user("bia").is_err());
        assert_eq!(ctrl.usernames().collect::<Vec<_>>(), vec!["ana", "bia", "zoe"]);
    }

    #[test]
    fn test_get_missing_user() {
        let ctrl = Controller::new();
        let err = ctrl.get_user("ghost").unwrap_err();
        assert_eq!(err.to_string(), "fail: usuario nao encontrado");
    }

    #[test]
    fn test_remove_missing_user() {
        let mut ctrl = Controller::new();
        let err = ctrl.remove_user("ghost").unwrap_err();
        assert_eq!(err.to_string(), "fail: usuario nao existe");
    }

    #[test]
    fn test_tweet_reaches_followers_and_author() {
        let mut ctrl = with_users(&["alice", "bob"]);
        ctrl.follow("bob", "alice").unwrap();
        let id = ctrl.send_tweet("alice", "hello world").unwrap();
        assert_eq!(id, TweetId(0));
        assert_eq!(ctrl.timeline("bob").unwrap(), vec!["0:alice: (hello world)"]);
        assert_eq!(ctrl.timeline("alice").unwrap(), vec!["0:alice: (hello world)"]);
    }

    #[test]
    fn test_fan_out_is_snapshot_at_send_time() {
        let mut ctrl = with_users(&["a", "b", "c"]);
        ctrl.follow("b", "a").unwrap();
        ctrl.send_tweet("a", "early").unwrap();
        ctrl.follow("c", "a").unwrap();
        ctrl.send_tweet("a", "late").unwrap();

        assert_eq!(ctrl.timeline("b").unwrap().len(), 2);
        assert_eq!(ctrl.timeline("c").unwrap(), vec!["1:a: (late)"]);
    }

    #[test]
    fn test_follow_unfollow_are_inverse() {
        let mut ctrl = with_users(&["a", "b"]);
        ctrl.follow("a", "b").unwrap();
        ctrl.send_tweet("b", "hi").unwrap();
        assert_eq!(ctrl.timeline("a").unwrap().len(), 1);

        ctrl.unfollow("a", "b").unwrap();
        assert_eq!(ctrl.get_user("a").unwrap().following().count(), 0);
        assert_eq!(ctrl.get_user("b").unwrap().followers().count(), 0);
        assert!(ctrl.timeline("a").unwrap().is_empty());
    }

    #[test]
    fn test_self_follow_never_mutates() {
        let mut ctrl = with_users(&["a"]);
        let err = ctrl.follow("a", "a").unwrap_err();
        assert!(matches!(err, ChirpError::SelfFollow(_)));
        let a = ctrl.get_user("a").unwrap();
        assert_eq!(a.following().count(), 0);
        assert_eq!(a.followers().count(), 0);
    }

    #[test]
    fn test_follow_unknown_user() {
        let mut ctrl = with_users(&["a"]);
        let err = ctrl.follow("a", "ghost").unwrap_err();
        assert!(matches!(err, ChirpError::UserNotFound { .. }));
        let err = ctrl.follow("ghost", "a").unwrap_err();
        assert!(matches!(err, ChirpError::UserNotFound { .. }));
    }

    #[test]
    fn test_unfollow_unknown_followee_is_not_following() {
        let mut ctrl = with_users(&["a"]);
        let err = ctrl.unfollow("a", "ghost").unwrap_err();
        assert!(matches!(err, ChirpError::NotFollowing { .. }));
    }

    #[test]
    fn test_timeline_strictly_descending() {
        let mut ctrl = with_users(&["a", "b"]);
        ctrl.follow("a", "b").unwrap();
        ctrl.send_tweet("a", "0").unwrap();
        ctrl.send_tweet("b", "1").unwrap();
        ctrl.send_tweet("a", "2").unwrap();
        assert_eq!(
            ctrl.timeline("a").unwrap(),
            vec!["2:a: (2)", "1:b: (1)", "0:a: (0)"]
        );
    }

    #[test]
    fn test_like_twice() {
        let mut ctrl = with_users(&["a"]);
        let id = ctrl.send_tweet("a", "hi").unwrap();
        ctrl.like("a", id).unwrap();
        let err = ctrl.like("a", id).unwrap_err();
        assert!(matches!(err, ChirpError::DuplicateLike { .. }));
        assert_eq!(ctrl.tweet(id).unwrap().likes().len(), 1);
    }

    #[test]
    fn test_like_outside_timeline() {
        let mut ctrl = with_users(&["a", "b"]);
        let id = ctrl.send_tweet("a", "hi").unwrap();
        let err = ctrl.like("b", id).unwrap_err();
        assert_eq!(err.to_string(), "fail: tweet nao existe");
    }

    #[test]
    fn test_liked_retweet_shows_own_likes() {
        let mut ctrl = with_users(&["a"]);
        ctrl.send_tweet("a", "hi").unwrap();
        let rt = ctrl.send_retweet("a", TweetId(0), "nice").unwrap();
        assert_eq!(rt, TweetId(1));
        assert_eq!(ctrl.tweet(rt).unwrap().retweet_of(), Some(TweetId(0)));

        ctrl.like("a", rt).unwrap();
        assert_eq!(
            ctrl.timeline("a").unwrap(),
            vec!["1:a: (nice) [a]", "0:a: (hi)"]
        );
    }

    #[test]
    fn test_unliked_retweet_is_indented() {
        let mut ctrl = with_users(&["a", "b"]);
        ctrl.follow("b", "a").unwrap();
        ctrl.send_tweet("a", "hi").unwrap();
        ctrl.send_retweet("b", TweetId(0), "").unwrap();
        assert_eq!(ctrl.timeline("b").unwrap()[0], "     0:a: (hi)");
    }

    #[test]
    fn test_retweet_of_unknown_tweet() {
        let mut ctrl = with_users(&["a"]);
        let err = ctrl.send_retweet("a", TweetId(7), "x").unwrap_err();
        assert_eq!(err.to_string(), "fail: tweet nao encontrado");
        // no id was consumed
        assert_eq!(ctrl.send_tweet("a", "first").unwrap(), TweetId(0));
    }

    #[test]
    fn test_tweet_from_unknown_user_consumes_no_id() {
        let mut ctrl = with_users(&["a"]);
        assert!(ctrl.send_tweet("ghost", "x").is_err());
        assert_eq!(ctrl.tweet_count(), 0);
        assert_eq!(ctrl.send_tweet("a", "x").unwrap(), TweetId(0));
    }

    #[test]
    fn test_remove_user_severs_edges_but_keeps_tweets() {
        let mut ctrl = with_users(&["a", "b", "c"]);
        ctrl.follow("a", "b").unwrap();
        ctrl.follow("b", "a").unwrap();
        ctrl.follow("c", "a").unwrap();
        ctrl.send_tweet("a", "bye").unwrap();

        ctrl.remove_user("a").unwrap();

        assert!(ctrl.get_user("a").is_err());
        for name in ["b", "c"] {
            let user = ctrl.get_user(name).unwrap();
            assert!(!user.is_following("a"));
            assert!(!user.is_followed_by("a"));
        }
        assert_eq!(ctrl.timeline("b").unwrap(), vec!["0:a: (bye)"]);
        assert!(ctrl.tweet(TweetId(0)).is_some());
    }

    #[test]
    fn test_deleted_tweet_hidden_from_timeline() {
        let mut ctrl = with_users(&["a"]);
        ctrl.send_tweet("a", "one").unwrap();
        ctrl.send_tweet("a", "two").unwrap();
        ctrl.delete_tweet(TweetId(1)).unwrap();
        assert_eq!(ctrl.timeline("a").unwrap(), vec!["0:a: (one)"]);
        assert_eq!(ctrl.my_tweets("a").unwrap().len(), 2);
        assert!(ctrl.delete_tweet(TweetId(5)).is_err());
    }

    #[test]
    fn test_render_all_users() {
        let mut ctrl = with_users(&["b", "a"]);
        ctrl.follow("a", "b").unwrap();
        assert_eq!(
            ctrl.render(),
            "a\n  seguidos   [b]\n  seguidores []\nb\n  seguidos   []\n  seguidores [a]"
        );
    }
}
