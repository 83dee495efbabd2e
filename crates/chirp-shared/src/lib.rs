//! # chirp-shared
//!
//! Types shared by every chirp crate: identifiers, the error taxonomy, and
//! the constants that make up the line protocol.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{ChirpError, Lookup, Result};
pub use types::{TweetId, Username};
