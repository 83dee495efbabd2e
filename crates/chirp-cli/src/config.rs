//! Shell configuration loaded from environment variables.
//!
//! Every setting has a default, so the shell runs with zero configuration
//! and reads commands from standard input.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Echo every input line, prefixed with `$`, before its output.
    /// Env: `CHIRP_ECHO` (true/false)
    /// Default: `true`
    pub echo: bool,

    /// Read commands from this file instead of standard input.
    /// Env: `CHIRP_INPUT`
    /// Default: unset (stdin).
    pub input_path: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set.
    /// Env: `CHIRP_LOG`
    /// Default: `warn`
    pub log_filter: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            echo: true,
            input_path: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl ShellConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("CHIRP_ECHO") {
            match parse_bool(&val) {
                Some(echo) => config.echo = echo,
                None => {
                    tracing::warn!(value = %val, "Invalid CHIRP_ECHO, using default");
                }
            }
        }

        if let Some(path) = lookup("CHIRP_INPUT") {
            if !path.is_empty() {
                config.input_path = Some(PathBuf::from(path));
            }
        }

        // RUST_LOG takes precedence; main consults it before this value.
        if let Some(filter) = lookup("CHIRP_LOG") {
            if !filter.is_empty() {
                config.log_filter = filter;
            }
        }

        config
    }
}

/// Open the command source selected by `config`: the `CHIRP_INPUT` file
/// when set, standard input otherwise.
pub fn open_input(config: &ShellConfig) -> anyhow::Result<Box<dyn BufRead>> {
    match &config.input_path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open command file {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
