//! Command execution
//!
//! Every version-control operation is a [`ShellCommand`] handed to a
//! [`CommandRunner`]. Commands run to completion before the pipeline moves
//! on; the runner captures their output and turns a non-zero exit into
//! [`Error::CommandFailed`](crate::error::Error::CommandFailed).

mod runner;

pub use runner::{ShellRunner, should_echo};

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// Runs commands in a given directory
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` in `dir` and return its trimmed combined output
    async fn run(&self, dir: &Path, command: &ShellCommand) -> Result<String>;
}

/// A program and its arguments
///
/// Arguments are handed to the process as-is (no shell in between). The
/// `Display` form is the command line a user would type, with arguments
/// containing whitespace or quotes wrapped in double quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    program: String,
    args: Vec<String>,
}

impl ShellCommand {
    /// Command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// `git` with the given arguments
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git").args(args)
    }

    /// A user script interpreted by the platform shell
    pub fn script(script: impl Into<String>) -> Self {
        if cfg!(windows) {
            Self::new("cmd").arg("/C").arg(script)
        } else {
            Self::new("sh").arg("-c").arg(script)
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments, unquoted
    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            f.write_str(" ")?;
            if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'')
            {
                write!(f, "\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))?;
            } else {
                f.write_str(arg)?;
            }
        }
        Ok(())
    }
}
