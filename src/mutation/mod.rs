//! The per-task part of a batch: what to change and how to describe it
//!
//! A [`Mutation`] is injected into the
//! [`BatchUpdater`](crate::updater::BatchUpdater). It names the branch, edits
//! files in each fresh checkout, and supplies the commit message and pull
//! request body.

mod script;

pub use script::ScriptMutation;

use crate::checkout::Checkout;
use crate::error::Result;
use crate::platform::HostingService;
use crate::shell::{CommandRunner, ShellCommand};
use crate::types::Repository;
use async_trait::async_trait;
use std::path::Path;

/// One automation task applied to every repository in a batch
#[async_trait]
pub trait Mutation: Send {
    /// Branch to create on each fork
    fn branch_name(&self) -> String;

    /// Commit message, also the pull request title
    ///
    /// Read after [`mutate_files`](Self::mutate_files), so it may depend on
    /// what the mutation found.
    fn commit_message(&self) -> String;

    /// Pull request description, read after [`mutate_files`](Self::mutate_files)
    fn pull_request_body(&self) -> String;

    /// Change files in the checkout and stage them
    ///
    /// `Ok(true)` proceeds to commit and open the pull request. `Ok(false)`
    /// declines: no pull request is opened and the rest of the batch is
    /// abandoned. Errors end the batch.
    async fn mutate_files(&mut self, ctx: &MutationContext<'_>) -> Result<bool>;
}

/// What a mutation can see and do for the repository being processed
pub struct MutationContext<'a> {
    /// Repository the pull request targets
    pub upstream: &'a Repository,
    /// Fork being pushed to
    pub fork: &'a Repository,
    /// Local working copy
    pub checkout: &'a Checkout,
    runner: &'a dyn CommandRunner,
    hosting: &'a dyn HostingService,
}

impl<'a> MutationContext<'a> {
    /// Bundle the pieces a mutation works with
    pub fn new(
        upstream: &'a Repository,
        fork: &'a Repository,
        checkout: &'a Checkout,
        runner: &'a dyn CommandRunner,
        hosting: &'a dyn HostingService,
    ) -> Self {
        Self {
            upstream,
            fork,
            checkout,
            runner,
            hosting,
        }
    }

    /// Root of the working copy
    pub fn path(&self) -> &Path {
        &self.checkout.path
    }

    /// Run a command inside the working copy
    pub async fn run(&self, command: &ShellCommand) -> Result<String> {
        self.runner.run(&self.checkout.path, command).await
    }

    /// Whether `path` exists on upstream's default branch
    pub async fn file_exists(&self, path: &str) -> Result<bool> {
        self.hosting
            .file_exists(&self.upstream.full_name(), &self.upstream.default_branch, path)
            .await
    }
}
