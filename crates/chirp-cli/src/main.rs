//! # chirp
//!
//! Reads feed commands line by line (from stdin or `CHIRP_INPUT`) and writes
//! the transcript to stdout. Logs go to stderr.

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use chirp_cli::{open_input, Shell, ShellConfig};
use chirp_shared::constants::APP_NAME;

fn main() -> anyhow::Result<()> {
    let config = ShellConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    info!("Starting {} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
    info!(?config, "Loaded configuration");

    let input = open_input(&config)?;
    let mut shell = Shell::new(&config);
    let stdout = io::stdout();
    let mut output = stdout.lock();
    shell.run(input, &mut output)?;

    info!(
        users = shell.controller().user_count(),
        tweets = shell.controller().tweet_count(),
        "Input finished"
    );
    Ok(())
}
