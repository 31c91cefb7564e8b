//! Build command invocation
//!
//! The command is a literal string split into tokens at whitespace; the
//! first token is the program, the rest are its arguments. The child runs
//! synchronously in the watched file's directory with stdout discarded and
//! stderr inherited. Its exit status is not inspected; the next save simply
//! runs the command again.

use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{OnsaveError, OnsaveResult};

/// A build command ready to run on each save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    tokens: Vec<String>,
}

impl BuildCommand {
    /// Parse a command string into whitespace-separated tokens.
    ///
    /// A string with no tokens (empty or all whitespace) is rejected.
    pub fn parse(command: &str) -> OnsaveResult<Self> {
        let tokens: Vec<String> = command.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Err(OnsaveError::EmptyCommand);
        }
        Ok(Self { tokens })
    }

    /// The program token.
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Argument tokens after the program.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// Run the command in `cwd` and wait for it to finish.
    ///
    /// The exit status is discarded. Failing to spawn at all (e.g. the
    /// program does not exist) is an error.
    pub fn run(&self, cwd: &Path) -> OnsaveResult<()> {
        Command::new(self.program())
            .args(self.args())
            .current_dir(cwd)
            .stdout(Stdio::null())
            .status()?;
        Ok(())
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}
