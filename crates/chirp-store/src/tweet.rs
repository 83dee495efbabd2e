use std::collections::BTreeMap;

use chirp_shared::constants::{LIST_SEPARATOR, RETWEET_INDENT};
use chirp_shared::{ChirpError, Result, TweetId, Username};

/// Every tweet in the system, keyed by id. Owned by the controller.
pub type TweetRegistry = BTreeMap<TweetId, Tweet>;

/// A posted message.
///
/// The text and author never change after creation; only the like-set and
/// the deleted flag do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    id: TweetId,
    author: Username,
    message: String,
    /// Likers in the order they liked. Never holds a name twice.
    likes: Vec<Username>,
    /// Key of the original tweet when this one is a retweet.
    retweet_of: Option<TweetId>,
    deleted: bool,
}

impl Tweet {
    pub fn new(id: TweetId, author: impl Into<Username>, message: impl Into<String>) -> Self {
        Self {
            id,
            author: author.into(),
            message: message.into(),
            likes: Vec::new(),
            retweet_of: None,
            deleted: false,
        }
    }

    /// Create a retweet of `original`.
    pub fn retweet(
        id: TweetId,
        author: impl Into<Username>,
        message: impl Into<String>,
        original: TweetId,
    ) -> Self {
        Self {
            retweet_of: Some(original),
            ..Self::new(id, author, message)
        }
    }

    pub fn id(&self) -> TweetId {
        self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn likes(&self) -> &[Username] {
        &self.likes
    }

    pub fn retweet_of(&self) -> Option<TweetId> {
        self.retweet_of
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Flag the tweet as deleted. There is no way back.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Record a like from `username`.
    ///
    /// The liker is not checked against the user registry.
    pub fn like(&mut self, username: &str) -> Result<()> {
        if self.likes.iter().any(|liker| liker == username) {
            return Err(ChirpError::DuplicateLike {
                username: username.to_string(),
                id: self.id,
            });
        }
        self.likes.push(username.to_string());
        Ok(())
    }

    /// Render the tweet as a single timeline line.
    ///
    /// Own likes take precedence: a liked retweet shows itself with its
    /// likes. An unliked retweet shows the original's rendering, indented,
    /// which recurses through chains of retweets.
    pub fn render(&self, registry: &TweetRegistry) -> String {
        if !self.likes.is_empty() {
            return format!(
                "{}:{}: ({}) [{}]",
                self.id,
                self.author,
                self.message(),
                self.likes.join(LIST_SEPARATOR)
            );
        }
        if let Some(original) = self.retweet_of.and_then(|id| registry.get(&id)) {
            return format!("{}{}", RETWEET_INDENT, original.render(registry));
        }
        format!("{}:{}: ({})", self.id, self.author, self.message())
    }
}
