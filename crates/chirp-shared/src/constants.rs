/// Application name
pub const APP_NAME: &str = "chirp";

/// Prefix written before every echoed input line
pub const ECHO_PREFIX: &str = "$";

/// Indentation placed before the rendering of a retweeted original
pub const RETWEET_INDENT: &str = "     ";

/// Separator between names in rendered lists (likers, follow sets)
pub const LIST_SEPARATOR: &str = ", ";

/// Labels used when rendering a user's follow graph
pub const FOLLOWING_LABEL: &str = "  seguidos   ";
pub const FOLLOWERS_LABEL: &str = "  seguidores ";

/// Command keywords
pub const CMD_END: &str = "end";
pub const CMD_ADD: &str = "add";
pub const CMD_RM: &str = "rm";
pub const CMD_SHOW: &str = "show";
pub const CMD_FOLLOW: &str = "follow";
pub const CMD_UNFOLLOW: &str = "unfollow";
pub const CMD_TWEET: &str = "twittar";
pub const CMD_LIKE: &str = "like";
pub const CMD_TIMELINE: &str = "timeline";
pub const CMD_RETWEET: &str = "rt";
