//! Status reporting for batch runs
//!
//! The updater and the shell runner describe what they are doing through a
//! [`Reporter`]. The binary renders these as colored console lines; library
//! users that do not care can pass [`NoopReporter`].

use crate::types::PullRequest;

/// Receives status updates while a batch runs
pub trait Reporter: Send + Sync {
    /// A repository is about to be processed
    fn repository_started(&self, repo: &str);

    /// A pipeline step is starting
    fn step(&self, message: &str);

    /// A command is about to run
    fn command_started(&self, command: &str);

    /// Captured output of a finished command
    ///
    /// Only called when the output should be shown: verbose mode or a
    /// non-zero exit, and the output is not empty.
    fn command_output(&self, output: &str);

    /// Something was skipped
    fn warning(&self, message: &str);

    /// Something failed
    fn error(&self, message: &str);

    /// A pull request was opened
    fn pull_request_opened(&self, pr: &PullRequest);
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn repository_started(&self, _repo: &str) {}
    fn step(&self, _message: &str) {}
    fn command_started(&self, _command: &str) {}
    fn command_output(&self, _output: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn pull_request_opened(&self, _pr: &PullRequest) {}
}

/// Indent every line of `text` by `width` spaces
///
/// Empty lines stay empty.
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
