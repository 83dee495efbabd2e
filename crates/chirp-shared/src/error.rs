use thiserror::Error;

use crate::types::{TweetId, Username};

/// Where a failed lookup happened. The printed text differs between a plain
/// lookup and the lookup that precedes a removal or a retweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Resolving a user or a tweet for an ordinary operation.
    Find,
    /// Resolving a user about to be removed, or an inbox entry.
    Exists,
}

fn not_found_verb(lookup: &Lookup) -> &'static str {
    match lookup {
        Lookup::Find => "encontrado",
        Lookup::Exists => "existe",
    }
}

/// Every failure a command can produce.
///
/// The `Display` text is exactly the line printed by the command loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChirpError {
    #[error("fail: usuario ja existe")]
    DuplicateUser(Username),

    #[error("fail: usuario nao {}", not_found_verb(.lookup))]
    UserNotFound { username: Username, lookup: Lookup },

    #[error("You cannot follow yourself")]
    SelfFollow(Username),

    #[error("You are already following this user")]
    AlreadyFollowing { follower: Username, followee: Username },

    #[error("You are not following this user")]
    NotFollowing { follower: Username, followee: Username },

    #[error("fail: tweet nao {}", not_found_verb(.lookup))]
    TweetNotFound { id: TweetId, lookup: Lookup },

    #[error("fail: {username} voce ja curtiu essa mensagem")]
    DuplicateLike { username: Username, id: TweetId },

    #[error("fail: comando invalido")]
    InvalidCommand(String),

    #[error("fail: ({0}) is not a number")]
    InvalidNumber(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ChirpError>;
