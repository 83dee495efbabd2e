//! # chirp-cli
//!
//! Line-oriented front end for the chirp feed. Each input line is one
//! command; results and failures are written back as plain text.

pub mod command;
pub mod config;
pub mod shell;

pub use command::Command;
pub use config::{open_input, ShellConfig};
pub use shell::{Flow, Outcome, Shell};
