//! Batch updater
//!
//! Runs the same pipeline over every repository in a list:
//! 1. Resolve the repository
//! 2. Ensure a fork exists
//! 3. Clone the fork and branch off upstream
//! 4. Hand the checkout to the [`Mutation`]
//! 5. Commit, push and open the pull request
//!
//! Failures in stages 1-3 are reported and the batch moves on to the next
//! repository. A mutation that declines ends the whole batch. Errors from the
//! mutation itself or from stage 5 are returned to the caller.

mod outcome;

pub use outcome::{BatchReport, FailureStage, RepoOutcome, RepoResult, SkipReason};

use crate::checkout::{
    CloneRequest, PullRequestContent, SetupError, clone_fork, open_pull_request,
};
use crate::config::Config;
use crate::error::Result;
use crate::mutation::{Mutation, MutationContext};
use crate::platform::HostingService;
use crate::report::Reporter;
use crate::shell::CommandRunner;
use crate::types::{CloneProtocol, RepoName, Repository, User};
use std::path::PathBuf;
use tracing::debug;

/// Ordered list of `owner/name` strings to process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Repositories(Vec<String>);

impl Repositories {
    /// Names in processing order
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of repositories
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there is nothing to process
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Repositories {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for Repositories {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<Vec<String>> for Repositories {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl From<&[&str]> for Repositories {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|n| (*n).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Repositories {
    fn from(names: [&str; N]) -> Self {
        Self(names.iter().map(|n| (*n).to_string()).collect())
    }
}

/// Knobs for a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdaterOptions {
    /// Directory forks are cloned into
    pub workdir: PathBuf,
    /// Clone URL flavor
    pub protocol: CloneProtocol,
    /// Stop after the mutation; no commit, push or PR
    pub dry_run: bool,
}

impl Default for UpdaterOptions {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            protocol: CloneProtocol::default(),
            dry_run: false,
        }
    }
}

impl From<&Config> for UpdaterOptions {
    fn from(config: &Config) -> Self {
        Self {
            workdir: config.workdir.clone(),
            protocol: config.protocol,
            dry_run: false,
        }
    }
}

/// Drives the pipeline over a batch of repositories
pub struct BatchUpdater<'a> {
    hosting: &'a dyn HostingService,
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
    options: UpdaterOptions,
    user: User,
}

impl<'a> BatchUpdater<'a> {
    /// Resolve the authenticated user and build an updater
    pub async fn connect(
        hosting: &'a dyn HostingService,
        runner: &'a dyn CommandRunner,
        reporter: &'a dyn Reporter,
        options: UpdaterOptions,
    ) -> Result<Self> {
        let user = hosting.get_user().await?;
        debug!(login = %user.login, "batch updater ready");
        Ok(Self {
            hosting,
            runner,
            reporter,
            options,
            user,
        })
    }

    /// The authenticated user forks are created for
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Run the pipeline for each repository, in order
    pub async fn run(
        &self,
        repositories: impl Into<Repositories>,
        mutation: &mut dyn Mutation,
    ) -> Result<BatchReport> {
        let repositories = repositories.into();
        let mut report = BatchReport::default();

        for (index, name) in repositories.names().iter().enumerate() {
            self.reporter.repository_started(name);

            self.reporter.step("Ensuring repository exists");
            let upstream = match self.resolve_repo(name).await {
                Ok(repo) => repo,
                Err(e) => {
                    self.reporter.error(&format!(
                        "An error occurred when trying to get the repository ({e})"
                    ));
                    report.record(name, failed(FailureStage::Resolve, &e));
                    continue;
                }
            };

            self.reporter.step("Ensuring fork exists (and creating if not)");
            let fork = match self.ensure_fork(&upstream).await {
                Ok(fork) => fork,
                Err(e) => {
                    self.reporter.error(&format!(
                        "An error occurred when trying to set up a fork ({e})"
                    ));
                    report.record(name, failed(FailureStage::Fork, &e));
                    continue;
                }
            };

            let branch = mutation.branch_name();
            let request = CloneRequest {
                workdir: &self.options.workdir,
                upstream: &upstream,
                fork: &fork,
                branch: &branch,
                protocol: self.options.protocol,
            };
            let checkout = match clone_fork(self.runner, &request).await {
                Ok(checkout) => checkout,
                Err(SetupError::BranchExists { branch }) => {
                    self.reporter.warning(&format!(
                        "Branch {branch} already exists - skipping repository"
                    ));
                    report.record(name, RepoOutcome::Skipped(SkipReason::BranchExists(branch)));
                    continue;
                }
                Err(SetupError::Failed(e)) => {
                    self.reporter
                        .error(&format!("An error occurred - skipping repository ({e})"));
                    report.record(name, failed(FailureStage::Clone, &e));
                    continue;
                }
            };

            let ctx =
                MutationContext::new(&upstream, &fork, &checkout, self.runner, self.hosting);
            if !mutation.mutate_files(&ctx).await? {
                self.reporter.warning("Skipping repository");
                report.record(name, RepoOutcome::Declined);
                report.not_attempted = repositories.names()[index + 1..].to_vec();
                debug!(repo = %name, remaining = report.not_attempted.len(), "batch aborted");
                return Ok(report);
            }

            if self.options.dry_run {
                debug!(repo = %name, "dry run, not committing");
                report.record(name, RepoOutcome::DryRun);
                continue;
            }

            let content = PullRequestContent {
                message: mutation.commit_message(),
                body: mutation.pull_request_body(),
            };
            let pr = open_pull_request(
                self.runner,
                self.hosting,
                &checkout,
                &upstream,
                &fork,
                &content,
            )
            .await?;
            self.reporter.pull_request_opened(&pr);
            report.record(name, RepoOutcome::Opened(pr));
        }

        Ok(report)
    }

    async fn resolve_repo(&self, name: &str) -> Result<Repository> {
        let repo_name: RepoName = name.parse()?;
        self.hosting.get_repo(&repo_name).await
    }

    /// The repository itself if we own it, otherwise a fork of it
    async fn ensure_fork(&self, upstream: &Repository) -> Result<Repository> {
        if upstream.is_owned_by(&self.user.login) {
            debug!(repo = %upstream.full_name(), "already owned, using as fork");
            return Ok(upstream.clone());
        }
        self.hosting.create_fork(upstream).await
    }
}

fn failed(stage: FailureStage, error: &crate::error::Error) -> RepoOutcome {
    RepoOutcome::Failed {
        stage,
        message: error.to_string(),
    }
}
