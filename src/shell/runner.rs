//! Subprocess-backed command runner

use super::{CommandRunner, ShellCommand};
use crate::error::{Error, Result};
use crate::report::Reporter;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::debug;

/// Runs commands as child processes
///
/// Each command blocks the pipeline until it exits. Output is captured, never
/// streamed.
pub struct ShellRunner {
    verbose: bool,
    reporter: Arc<dyn Reporter>,
}

impl ShellRunner {
    /// Create a runner; `verbose` echoes output of successful commands too
    pub fn new(verbose: bool, reporter: Arc<dyn Reporter>) -> Self {
        Self { verbose, reporter }
    }

    /// Whether output of successful commands is echoed
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Whether captured output should be shown to the user
pub const fn should_echo(verbose: bool, success: bool, output: &str) -> bool {
    (verbose || !success) && !output.is_empty()
}

/// Stdout followed by stderr, trimmed
fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);
    let stdout = stdout.trim_end();
    let stderr = stderr.trim_end();

    let combined = match (stdout.is_empty(), stderr.is_empty()) {
        (true, _) => stderr.to_string(),
        (false, true) => stdout.to_string(),
        (false, false) => format!("{stdout}\n{stderr}"),
    };
    combined.trim().to_string()
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, dir: &Path, command: &ShellCommand) -> Result<String> {
        let rendered = command.to_string();
        self.reporter.command_started(&rendered);
        debug!(command = %rendered, dir = %dir.display(), "running command");

        let output = Command::new(command.program())
            .args(command.arguments())
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| Error::CommandSpawn {
                command: rendered.clone(),
                source,
            })?;

        let combined = combine_output(&output.stdout, &output.stderr);
        let success = output.status.success();

        if should_echo(self.verbose, success, &combined) {
            self.reporter.command_output(&combined);
        }

        if success {
            debug!(command = %rendered, "command succeeded");
            Ok(combined)
        } else {
            debug!(command = %rendered, code = ?output.status.code(), "command failed");
            Err(Error::CommandFailed {
                command: rendered,
                code: output.status.code(),
            })
        }
    }
}
