use std::fmt;
use std::str::FromStr;

use crate::error::ChirpError;

/// Users are identified by their unique name.
pub type Username = String;

/// Tweet identifier, allocated monotonically by the controller and never
/// reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TweetId(pub u64);

impl TweetId {
    /// The id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TweetId {
    type Err = ChirpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| ChirpError::InvalidNumber(s.to_string()))
    }
}
