//! Scripted command runner for testing

use async_trait::async_trait;
use batchpr::error::{Error, Result};
use batchpr::shell::{CommandRunner, ShellCommand};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A command the runner was asked to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCall {
    pub dir: PathBuf,
    pub command: String,
}

#[derive(Debug, Clone)]
enum Response {
    Output(String),
    Fail,
}

/// Runner that records commands instead of executing them
///
/// Responses are chosen by command-line prefix; the most recently added
/// matching rule wins. Unmatched commands succeed with empty output, except
/// `git checkout origin/...`, which fails so branches look new.
pub struct MockRunner {
    rules: Mutex<Vec<(String, Response)>>,
    calls: Mutex<Vec<RunCall>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(vec![("git checkout origin/".to_string(), Response::Fail)]),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Commands starting with `prefix` succeed with `output`
    pub fn respond(&self, prefix: &str, output: &str) {
        self.rules
            .lock()
            .unwrap()
            .push((prefix.to_string(), Response::Output(output.to_string())));
    }

    /// Commands starting with `prefix` exit non-zero
    pub fn fail_on(&self, prefix: &str) {
        self.rules
            .lock()
            .unwrap()
            .push((prefix.to_string(), Response::Fail));
    }

    /// Make the `origin/<branch>` probe succeed
    pub fn branch_exists(&self) {
        self.respond("git checkout origin/", "");
    }

    // === Call inspection ===

    pub fn calls(&self) -> Vec<RunCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Command lines in order
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    /// Command lines run in a directory ending with `name`
    pub fn commands_in(&self, name: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.dir.ends_with(name))
            .map(|c| c.command)
            .collect()
    }

    // === Assertions ===

    pub fn assert_ran(&self, command: &str) {
        let commands = self.commands();
        assert!(
            commands.iter().any(|c| c == command),
            "expected `{command}` in {commands:#?}"
        );
    }

    pub fn assert_none_start_with(&self, prefix: &str) {
        let commands = self.commands();
        assert!(
            !commands.iter().any(|c| c.starts_with(prefix)),
            "expected no command starting with `{prefix}` in {commands:#?}"
        );
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, dir: &Path, command: &ShellCommand) -> Result<String> {
        let line = command.to_string();
        self.calls.lock().unwrap().push(RunCall {
            dir: dir.to_path_buf(),
            command: line.clone(),
        });

        let response = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, response)| response.clone());

        match response {
            Some(Response::Fail) => Err(Error::CommandFailed {
                command: line,
                code: Some(1),
            }),
            Some(Response::Output(output)) => Ok(output),
            None => Ok(String::new()),
        }
    }
}
