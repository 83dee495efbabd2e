//! The command loop.
//!
//! A [`Shell`] owns the [`Controller`] for the lifetime of the process and
//! feeds it one command per input line. Domain failures are printed and the
//! loop moves on; only `end`, end of input, or an I/O error stop it.

use std::io::{self, BufRead, Write};

use tracing::debug;

use chirp_shared::constants::ECHO_PREFIX;
use chirp_shared::Result;
use chirp_store::Controller;

use crate::command::Command;
use crate::config::ShellConfig;

/// Whether the loop keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// What a successfully executed command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to print.
    Silent,
    /// A text block to print, followed by a newline.
    Block(String),
    /// Stop reading input.
    Stop,
}

#[derive(Debug)]
pub struct Shell {
    controller: Controller,
    echo: bool,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(&ShellConfig::default())
    }
}

impl Shell {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            controller: Controller::new(),
            echo: config.echo,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Process every line of `input` until `end` or end of input.
    pub fn run(&mut self, input: impl BufRead, output: &mut impl Write) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let flow = self.handle_line(line.trim_end_matches('\r'), output)?;
            output.flush()?;
            if flow == Flow::Stop {
                break;
            }
        }
        Ok(())
    }

    /// Echo, parse, and execute one line, writing its output.
    pub fn handle_line(&mut self, line: &str, output: &mut impl Write) -> io::Result<Flow> {
        if self.echo {
            writeln!(output, "{ECHO_PREFIX}{line}")?;
        }

        match Command::parse(line).and_then(|command| self.execute(command)) {
            Ok(Outcome::Stop) => return Ok(Flow::Stop),
            Ok(Outcome::Block(block)) => writeln!(output, "{block}")?,
            Ok(Outcome::Silent) => {}
            Err(e) => {
                debug!(line = %line, error = ?e, "Command rejected");
                writeln!(output, "{e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Run a parsed command against the controller.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let ctrl = &mut self.controller;
        match command {
            Command::End => return Ok(Outcome::Stop),
            Command::Add { username } => ctrl.add_user(&username)?,
            Command::Remove { username } => ctrl.remove_user(&username)?,
            Command::Show => return Ok(Outcome::Block(ctrl.render())),
            Command::Follow { follower, followee } => ctrl.follow(&follower, &followee)?,
            Command::Unfollow { follower, followee } => ctrl.unfollow(&follower, &followee)?,
            Command::Tweet { username, message } => {
                ctrl.send_tweet(&username, &message)?;
            }
            Command::Like { username, id } => ctrl.like(&username, id)?,
            Command::Timeline { username } => {
                return Ok(Outcome::Block(ctrl.timeline(&username)?.join("\n")));
            }
            Command::Retweet {
                username,
                original,
                message,
            } => {
                ctrl.send_retweet(&username, original, &message)?;
            }
        }
        Ok(Outcome::Silent)
    }
}
