//! Parsing of single-line commands.
//!
//! Tokens are separated by single spaces, and a single trailing separator
//! does not start a new token. The first token picks the command; message
//! text is the rest of the line re-joined with spaces. Arguments are never
//! empty.

use chirp_shared::constants::{
    CMD_ADD, CMD_END, CMD_FOLLOW, CMD_LIKE, CMD_RETWEET, CMD_RM, CMD_SHOW, CMD_TIMELINE,
    CMD_TWEET, CMD_UNFOLLOW,
};
use chirp_shared::{ChirpError, Result, TweetId, Username};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    End,
    Add { username: Username },
    Remove { username: Username },
    Show,
    Follow { follower: Username, followee: Username },
    Unfollow { follower: Username, followee: Username },
    Tweet { username: Username, message: String },
    Like { username: Username, id: TweetId },
    Timeline { username: Username },
    Retweet { username: Username, original: TweetId, message: String },
}

impl Command {
    /// Parse one input line (without its line terminator).
    pub fn parse(line: &str) -> Result<Self> {
        let mut args: Vec<&str> = line.split(' ').collect();
        if args.len() > 1 && args.last() == Some(&"") {
            args.pop();
        }
        let arg = |i: usize| -> Result<Username> {
            args.get(i)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .ok_or_else(|| ChirpError::InvalidCommand(line.to_string()))
        };
        let rest = |from: usize| args.get(from..).unwrap_or_default().join(" ");

        let command = match args[0] {
            CMD_END => Self::End,
            CMD_ADD => Self::Add { username: arg(1)? },
            CMD_RM => Self::Remove { username: arg(1)? },
            CMD_SHOW => Self::Show,
            CMD_FOLLOW => Self::Follow {
                follower: arg(1)?,
                followee: arg(2)?,
            },
            CMD_UNFOLLOW => Self::Unfollow {
                follower: arg(1)?,
                followee: arg(2)?,
            },
            CMD_TWEET => Self::Tweet {
                username: arg(1)?,
                message: rest(2),
            },
            CMD_LIKE => Self::Like {
                username: arg(1)?,
                id: arg(2)?.parse()?,
            },
            CMD_TIMELINE => Self::Timeline { username: arg(1)? },
            CMD_RETWEET => Self::Retweet {
                username: arg(1)?,
                original: arg(2)?.parse()?,
                message: rest(3),
            },
            _ => return Err(ChirpError::InvalidCommand(line.to_string())),
        };
        Ok(command)
    }
}
