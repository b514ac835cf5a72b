//! Mutation driven by a user-supplied shell script

use super::{Mutation, MutationContext};
use crate::error::{Error, Result};
use crate::shell::ShellCommand;
use async_trait::async_trait;
use tracing::debug;

/// Runs a shell script in each checkout and stages whatever it changed
///
/// Declines when a required file is missing upstream or when the script
/// leaves the working tree unchanged.
#[derive(Debug, Clone)]
pub struct ScriptMutation {
    branch: String,
    message: String,
    body: String,
    script: String,
    require_file: Option<String>,
}

impl ScriptMutation {
    /// Create a script mutation
    pub fn new(
        branch: impl Into<String>,
        message: impl Into<String>,
        body: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            branch: branch.into(),
            message: message.into(),
            body: body.into(),
            script: script.into(),
            require_file: None,
        }
    }

    /// Only touch repositories that have `path` on their default branch
    #[must_use]
    pub fn with_required_file(mut self, path: impl Into<String>) -> Self {
        self.require_file = Some(path.into());
        self
    }
}

#[async_trait]
impl Mutation for ScriptMutation {
    fn branch_name(&self) -> String {
        self.branch.clone()
    }

    fn commit_message(&self) -> String {
        self.message.clone()
    }

    fn pull_request_body(&self) -> String {
        self.body.clone()
    }

    async fn mutate_files(&mut self, ctx: &MutationContext<'_>) -> Result<bool> {
        if let Some(required) = &self.require_file
            && !ctx.file_exists(required).await?
        {
            debug!(file = %required, repo = %ctx.upstream.full_name(), "required file missing");
            return Ok(false);
        }

        ctx.run(&ShellCommand::script(self.script.as_str()))
            .await
            .map_err(|e| Error::Mutation(format!("script failed: {e}")))?;

        ctx.run(&ShellCommand::git(["add", "-A"])).await?;
        let status = ctx.run(&ShellCommand::git(["status", "--porcelain"])).await?;

        if status.is_empty() {
            debug!(repo = %ctx.upstream.full_name(), "script made no changes");
            return Ok(false);
        }

        Ok(true)
    }
}
