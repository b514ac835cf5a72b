//! Commit, push and open the pull request

use super::Checkout;
use crate::error::Result;
use crate::platform::HostingService;
use crate::shell::{CommandRunner, ShellCommand};
use crate::types::{NewPullRequest, PullRequest, Repository};
use tracing::debug;

/// Text of the commit and pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContent {
    /// Commit message, also used as the PR title
    pub message: String,
    /// PR description
    pub body: String,
}

/// Commit staged changes, push the branch to the fork and open a PR upstream
///
/// The PR targets upstream's default branch from `<fork owner>:<branch>`.
pub async fn open_pull_request(
    runner: &dyn CommandRunner,
    hosting: &dyn HostingService,
    checkout: &Checkout,
    upstream: &Repository,
    fork: &Repository,
    content: &PullRequestContent,
) -> Result<PullRequest> {
    runner
        .run(
            &checkout.path,
            &ShellCommand::git(["commit", "-m", content.message.as_str()]),
        )
        .await?;
    runner
        .run(
            &checkout.path,
            &ShellCommand::git(["push", "origin", checkout.branch.as_str()]),
        )
        .await?;

    let request = NewPullRequest {
        title: content.message.clone(),
        body: content.body.clone(),
        base: upstream.default_branch.clone(),
        head: format!("{}:{}", fork.owner, checkout.branch),
    };
    debug!(head = %request.head, base = %request.base, "opening pull request");

    hosting.create_pull(upstream, &request).await
}
